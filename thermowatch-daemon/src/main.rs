//! Thermowatch daemon (thermowatchd)
//!
//! Samples a 10K NTC thermistor through an I2C converter, shows the
//! reading and the time on a 16x2 LCD, and raises a throttled alert when
//! the room leaves its safe band.
//!
//! # Startup
//! 1. Logging (`--log-level`, then `THERMOWATCH_LOG`, then `info`)
//! 2. Configuration file (defaults when missing)
//! 3. Converter detection on the I2C bus
//! 4. LCD backpack detection and panel init
//! 5. Notifier (email or log)
//!
//! # Shutdown
//! SIGINT/SIGTERM stop the loop after the current cycle; the LCD is
//! cleared and its backlight switched off on the way out.

mod clock;
mod config;
mod notify;
mod run;
mod setup;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use thermowatch_core::traits::{Sampler, StatusDisplay};
use thermowatch_core::units::UnknownUnit;
use thermowatch_core::{Monitor, Unit};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigSource, DaemonConfig, DEFAULT_CONFIG_PATH};
use crate::setup::Hardware;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted when `--log-level` is absent
const LOG_ENV: &str = "THERMOWATCH_LOG";

#[derive(Parser, Debug)]
#[command(name = "thermowatchd")]
#[command(version)]
#[command(about = "Room temperature monitor with LCD readout and email alerts")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log filter (e.g. "debug", "thermowatchd=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Override the display unit (F, C or K)
    #[arg(short, long, value_parser = parse_unit)]
    unit: Option<Unit>,

    /// Log alerts instead of emailing them
    #[arg(long)]
    dry_run: bool,
}

fn parse_unit(text: &str) -> Result<Unit, String> {
    text.parse().map_err(|e: UnknownUnit| e.to_string())
}

fn init_logging(cli_level: Option<&str>) -> Result<()> {
    let level = cli_level
        .map(str::to_owned)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_new(&level)
        .with_context(|| format!("invalid log filter {level:?}"))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .init();
    Ok(())
}

/// Flag raised by SIGINT or SIGTERM; the monitor loop stops at the next
/// cycle boundary
fn install_shutdown_handler() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install signal handler")?;
    Ok(shutdown)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    info!("thermowatchd {} starting", VERSION);

    let (mut config, source) = DaemonConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    match source {
        ConfigSource::File => info!(path = %cli.config.display(), "Configuration loaded"),
        ConfigSource::Defaults => info!(
            path = %cli.config.display(),
            "No configuration file, using defaults"
        ),
    }

    if let Some(unit) = cli.unit {
        config.monitor.unit = unit;
    }

    let mut hardware = Hardware::open(&config.hardware).context("hardware setup failed")?;
    let mut notifier = notify::build_notifier(config.email.as_ref(), cli.dry_run)
        .context("alert notifier setup failed")?;

    let shutdown = install_shutdown_handler()?;

    let mut monitor = Monitor::new(
        config
            .monitor
            .monitor_config(hardware.adc.full_scale()),
    );

    let Hardware { adc, display } = &mut hardware;
    let stats = run::run(
        &mut monitor,
        adc,
        display,
        notifier.as_mut(),
        config.monitor.poll_interval(),
        &shutdown,
    );

    info!(
        cycles = stats.cycles,
        skipped = stats.skipped,
        rejected = stats.rejected,
        alerts_sent = stats.alerts_sent,
        alerts_failed = stats.alerts_failed,
        alerts_suppressed = stats.alerts_suppressed,
        display_failures = hardware.display.failed_writes(),
        "Shutting down"
    );
    Ok(())
}
