//! Typed identifier newtypes backed by UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`NotificationEvent`](crate::alert::NotificationEvent).
///
/// Lets log lines from the monitor loop and from the notifier task be
/// correlated for a single alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(uuid::Uuid);

impl Default for AlertId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AlertId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
