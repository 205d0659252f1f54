//! Alerts: what the monitor emits when a sample crosses a threshold.

use serde::{Deserialize, Serialize};

use crate::id::AlertId;
use crate::time::Timestamp;

/// Which qualifying condition a sample met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Plugged in at or above `max_charge`.
    Overcharge,
    /// On battery at or below `min_charge`.
    Undercharge,
}

impl AlertKind {
    /// User-facing message for a battery at `percent`.
    #[must_use]
    pub fn message(self, percent: u8) -> String {
        match self {
            Self::Overcharge => format!("Battery level is {percent}%. Unplug your charger!"),
            Self::Undercharge => format!("Battery level is {percent}%. Plug in your charger!"),
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overcharge => f.write_str("overcharge"),
            Self::Undercharge => f.write_str("undercharge"),
        }
    }
}

/// A single alert, consumed immediately by the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub id: AlertId,
    pub kind: AlertKind,
    pub percent: u8,
    pub message: String,
    pub triggered_at: Timestamp,
}

impl NotificationEvent {
    #[must_use]
    pub fn new(kind: AlertKind, percent: u8, triggered_at: Timestamp) -> Self {
        Self {
            id: AlertId::new(),
            kind,
            percent,
            message: kind.message(percent),
            triggered_at,
        }
    }
}
