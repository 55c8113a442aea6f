//! Polling loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use thermowatch_core::monitor::AlertOutcome;
use thermowatch_core::traits::{Notifier, Sampler, StatusDisplay};
use thermowatch_core::{CycleReport, Monitor};
use tracing::{debug, info, trace, warn};

use crate::clock::{wall_clock, MonotonicClock};

/// Counters reported at shutdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub skipped: u64,
    pub rejected: u64,
    pub alerts_sent: u64,
    pub alerts_failed: u64,
    pub alerts_suppressed: u64,
}

impl LoopStats {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        match report {
            CycleReport::Skipped(_) => self.skipped += 1,
            CycleReport::Rejected { .. } => self.rejected += 1,
            CycleReport::Displayed { alert, .. } => match alert {
                AlertOutcome::Sent => self.alerts_sent += 1,
                AlertOutcome::Failed(_) => self.alerts_failed += 1,
                AlertOutcome::Suppressed { .. } => self.alerts_suppressed += 1,
                AlertOutcome::NotNeeded => {}
            },
        }
    }
}

fn log_report(report: &CycleReport) {
    match report {
        CycleReport::Skipped(error) => warn!(?error, "Sensor read failed, cycle skipped"),
        CycleReport::Rejected { raw, error } => {
            warn!(raw, ?error, "Sample rejected, nothing displayed")
        }
        CycleReport::Displayed {
            raw,
            reading,
            breach,
            alert,
        } => {
            trace!(raw, %reading, ?breach, "Sample");
            match alert {
                AlertOutcome::Sent => info!(%reading, ?breach, "Unsafe temperature, alert sent"),
                AlertOutcome::Failed(error) => {
                    warn!(%reading, ?error, "Unsafe temperature, alert delivery failed")
                }
                AlertOutcome::Suppressed { since_last_ms } => {
                    debug!(%reading, since_last_ms, "Unsafe temperature, alert suppressed")
                }
                AlertOutcome::NotNeeded => {}
            }
        }
    }
}

/// Poll until `shutdown` is set
pub fn run<S, D, N>(
    monitor: &mut Monitor,
    sampler: &mut S,
    display: &mut D,
    notifier: &mut N,
    interval: Duration,
    shutdown: &AtomicBool,
) -> LoopStats
where
    S: Sampler + ?Sized,
    D: StatusDisplay + ?Sized,
    N: Notifier + ?Sized,
{
    let clock = MonotonicClock::start();
    let mut stats = LoopStats::default();
    let mut display_failures = display.failed_writes();

    info!(
        unit = ?monitor.unit(),
        interval_ms = interval.as_millis() as u64,
        "Monitoring started"
    );

    while !shutdown.load(Ordering::SeqCst) {
        let started = Instant::now();

        let report = monitor.poll(sampler, display, notifier, clock.now_ms(), &wall_clock());
        log_report(&report);
        stats.record(&report);

        let failures = display.failed_writes();
        if failures > display_failures {
            warn!(
                new = failures - display_failures,
                total = failures,
                "Display write failed"
            );
            display_failures = failures;
        }

        thread::sleep(interval.saturating_sub(started.elapsed()));
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermowatch_core::safety::Alert;
    use thermowatch_core::traits::{DeliveryError, SensorError};

    /// Replays a script of samples, then raises the shutdown flag
    struct ScriptedSampler<'a> {
        script: Vec<Result<u16, SensorError>>,
        shutdown: &'a AtomicBool,
    }

    impl Sampler for ScriptedSampler<'_> {
        fn read_raw(&mut self) -> Result<u16, SensorError> {
            let next = self.script.remove(0);
            if self.script.is_empty() {
                self.shutdown.store(true, Ordering::SeqCst);
            }
            next
        }
    }

    #[derive(Default)]
    struct Lines(Vec<(String, String)>);

    impl StatusDisplay for Lines {
        fn render(&mut self, line1: &str, line2: &str) {
            self.0.push((line1.to_owned(), line2.to_owned()));
        }
    }

    #[derive(Default)]
    struct Outbox {
        sent: Vec<String>,
        fail: bool,
    }

    impl Notifier for Outbox {
        fn send(&mut self, alert: &Alert) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Transport);
            }
            self.sent.push(alert.reading.as_str().to_owned());
            Ok(())
        }
    }

    #[test]
    fn test_loop_runs_until_shutdown() {
        let shutdown = AtomicBool::new(false);
        let mut sampler = ScriptedSampler {
            script: vec![Ok(130), Err(SensorError::Bus), Ok(255), Ok(100), Ok(100)],
            shutdown: &shutdown,
        };
        let mut display = Lines::default();
        let mut outbox = Outbox::default();
        let mut monitor = Monitor::default();

        let stats = run(
            &mut monitor,
            &mut sampler,
            &mut display,
            &mut outbox,
            Duration::from_millis(1),
            &shutdown,
        );

        assert_eq!(stats.cycles, 5);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.alerts_sent, 1);
        assert_eq!(stats.alerts_suppressed, 1);

        // Only the three accepted samples reach the display
        assert_eq!(display.0.len(), 3);
        assert_eq!(display.0[0].0, "Temp: 75.42 F");
        assert_eq!(outbox.sent, vec!["95.36 F".to_owned()]);
    }

    #[test]
    fn test_failed_delivery_counted() {
        let shutdown = AtomicBool::new(false);
        let mut sampler = ScriptedSampler {
            script: vec![Ok(100)],
            shutdown: &shutdown,
        };
        let mut outbox = Outbox {
            fail: true,
            ..Outbox::default()
        };

        let stats = run(
            &mut Monitor::default(),
            &mut sampler,
            &mut Lines::default(),
            &mut outbox,
            Duration::from_millis(1),
            &shutdown,
        );

        assert_eq!(stats.alerts_failed, 1);
        assert!(outbox.sent.is_empty());
    }

    #[test]
    fn test_preset_shutdown_runs_nothing() {
        let shutdown = AtomicBool::new(true);
        let mut sampler = ScriptedSampler {
            script: vec![Ok(130)],
            shutdown: &shutdown,
        };

        let stats = run(
            &mut Monitor::default(),
            &mut sampler,
            &mut Lines::default(),
            &mut Outbox::default(),
            Duration::from_millis(1),
            &shutdown,
        );

        assert_eq!(stats, LoopStats::default());
    }
}
