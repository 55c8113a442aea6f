//! Monitor pipeline
//!
//! One tick converts a raw sample, formats it, evaluates it against the
//! safety band and consults the alert throttle. The tick is a plain
//! function of its inputs plus the throttle state, so the surrounding
//! driver picks its own scheduling (thread, timer, async task).

pub mod status;
pub mod tick;

pub use status::{StatusLines, LINE_LEN};
pub use tick::{AlertOutcome, CycleReport, Monitor, TickOutcome};
