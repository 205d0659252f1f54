//! Threshold policy: decides whether a sample warrants an alert.
//!
//! There is no hysteresis and no memory: the same sample against the same
//! bounds always gives the same answer. Repetition control, if any, lives
//! in the caller.

use serde::{Deserialize, Serialize};

use crate::alert::AlertKind;
use crate::bounds::Bounds;
use crate::sample::Sample;

/// How often an unchanged qualifying condition is re-announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    /// Alert on every qualifying cycle until the condition clears.
    #[default]
    EveryCycle,
    /// Alert once per crossing; re-arm after a cycle with no condition or
    /// with the opposite condition.
    OncePerCrossing,
}

/// Evaluate `sample` against `bounds`.
///
/// - plugged and `percent >= max_charge` → [`AlertKind::Overcharge`]
/// - unplugged and `percent <= min_charge` → [`AlertKind::Undercharge`]
/// - otherwise `None`
#[must_use]
pub fn evaluate(sample: Sample, bounds: Bounds) -> Option<AlertKind> {
    if sample.power_plugged() {
        (sample.percent() >= bounds.max_charge()).then_some(AlertKind::Overcharge)
    } else {
        (sample.percent() <= bounds.min_charge()).then_some(AlertKind::Undercharge)
    }
}
