//! Safety evaluation
//!
//! Detects out-of-band readings and decides when an alert may go out.

pub mod alert;
pub mod threshold;
pub mod throttle;

pub use alert::{Alert, ALERT_SUBJECT};
pub use threshold::{BreachStatus, ThresholdEvaluator};
pub use throttle::{AlertState, AlertThrottle, ThrottleDecision, ThrottlePhase};
