//! Monitor tick and polling cycle

use crate::config::{MonitorConfig, ThermistorModel, ThresholdBands};
use crate::safety::{Alert, AlertThrottle, BreachStatus, ThresholdEvaluator, ThrottleDecision};
use crate::sensor::ConversionError;
use crate::traits::{DeliveryError, Notifier, Sampler, SensorError, StatusDisplay};
use crate::units::{FormattedTemperature, Temperature, Unit};

use super::status::StatusLines;

/// Result of one tick on an accepted sample
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Converted temperature
    pub temperature: Temperature,
    /// Reading in the monitor's unit
    pub reading: FormattedTemperature,
    /// Band evaluation of the reading
    pub breach: BreachStatus,
    /// Throttle decision, present only on a breach
    pub decision: Option<ThrottleDecision>,
    /// Readout for the display
    pub lines: StatusLines,
    /// Alert to deliver, present only when the throttle allowed it
    pub alert: Option<Alert>,
}

/// What happened to the alert path during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertOutcome {
    /// Reading was within its band
    NotNeeded,
    /// Breach, but an alert went out `since_last_ms` ago
    Suppressed { since_last_ms: u64 },
    /// Alert delivered
    Sent,
    /// Delivery failed; the cooldown still started
    Failed(DeliveryError),
}

/// Summary of one polling cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleReport {
    /// Sampler failed; nothing else ran
    Skipped(SensorError),
    /// Sample could not be converted; nothing was displayed or evaluated
    Rejected { raw: u16, error: ConversionError },
    /// Sample accepted and displayed
    Displayed {
        raw: u16,
        reading: FormattedTemperature,
        breach: BreachStatus,
        alert: AlertOutcome,
    },
}

/// Sampling and alerting pipeline
///
/// Owns the only mutable state of the core: the alert throttle.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Monitor {
    model: ThermistorModel,
    evaluator: ThresholdEvaluator,
    unit: Unit,
    throttle: AlertThrottle,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

impl Monitor {
    /// Create a monitor with the standard model, bands and cooldown
    pub fn new(config: MonitorConfig) -> Self {
        let model = ThermistorModel::DEFAULT
            .with_rail_policy(config.rail_policy)
            .with_full_scale(config.full_scale);
        Self::with_parts(
            model,
            ThresholdEvaluator::new(ThresholdBands::DEFAULT),
            config.unit,
            AlertThrottle::new(),
        )
    }

    /// Create a monitor from explicit parts
    pub fn with_parts(
        model: ThermistorModel,
        evaluator: ThresholdEvaluator,
        unit: Unit,
        throttle: AlertThrottle,
    ) -> Self {
        Self {
            model,
            evaluator,
            unit,
            throttle,
        }
    }

    /// Unit used for display and evaluation
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Thermistor model
    pub fn model(&self) -> &ThermistorModel {
        &self.model
    }

    /// Threshold evaluator
    pub fn evaluator(&self) -> &ThresholdEvaluator {
        &self.evaluator
    }

    /// Alert throttle
    pub fn throttle(&self) -> &AlertThrottle {
        &self.throttle
    }

    /// Process one raw sample taken at monotonic `now_ms`
    ///
    /// `clock` is the wall-clock text shown on the display and quoted in
    /// the alert. A conversion error leaves the throttle untouched.
    pub fn on_tick(
        &mut self,
        raw: u16,
        now_ms: u64,
        clock: &str,
    ) -> Result<TickOutcome, ConversionError> {
        let temperature = self.model.convert(raw)?;
        let reading = temperature.format(self.unit);
        let breach = self.evaluator.check_value(reading.value, self.unit);

        let decision = if breach.is_breach() {
            Some(self.throttle.request(now_ms))
        } else {
            None
        };

        let alert = match decision {
            Some(ThrottleDecision::Send) => Some(Alert::new(reading.clone(), clock)),
            _ => None,
        };

        let lines = StatusLines::new(&reading, clock);

        Ok(TickOutcome {
            temperature,
            reading,
            breach,
            decision,
            lines,
            alert,
        })
    }

    /// Run one full cycle: sample, tick, maybe notify, render
    ///
    /// Never fails: sensor errors skip the cycle, conversion errors reject
    /// the sample, delivery errors are reported without retry.
    pub fn poll<S, D, N>(
        &mut self,
        sampler: &mut S,
        display: &mut D,
        notifier: &mut N,
        now_ms: u64,
        clock: &str,
    ) -> CycleReport
    where
        S: Sampler + ?Sized,
        D: StatusDisplay + ?Sized,
        N: Notifier + ?Sized,
    {
        let raw = match sampler.read_raw() {
            Ok(raw) => raw,
            Err(e) => return CycleReport::Skipped(e),
        };

        let outcome = match self.on_tick(raw, now_ms, clock) {
            Ok(outcome) => outcome,
            Err(error) => return CycleReport::Rejected { raw, error },
        };

        let alert = match (&outcome.alert, outcome.decision) {
            (Some(alert), _) => match notifier.send(alert) {
                Ok(()) => AlertOutcome::Sent,
                Err(e) => AlertOutcome::Failed(e),
            },
            (None, Some(ThrottleDecision::Suppressed { since_last_ms })) => {
                AlertOutcome::Suppressed { since_last_ms }
            }
            (None, _) => AlertOutcome::NotNeeded,
        };

        display.render(outcome.lines.line1(), outcome.lines.line2());

        CycleReport::Displayed {
            raw,
            reading: outcome.reading,
            breach: outcome.breach,
            alert,
        }
    }
}
