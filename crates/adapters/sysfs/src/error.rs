//! Sysfs adapter error types.

use std::path::PathBuf;

use battm_domain::error::BattmError;

/// Errors specific to the sysfs battery sensor.
#[derive(Debug, thiserror::Error)]
pub enum SysfsError {
    /// No system battery under the power-supply root.
    #[error("no battery found under {}", root.display())]
    NoBattery { root: PathBuf },

    /// The configured battery directory does not exist or is not present.
    #[error("battery {0} is not present")]
    BatteryMissing(String),

    /// An attribute file could not be read.
    #[error("failed to read power supply attribute")]
    Io(#[from] std::io::Error),

    /// The `capacity` attribute is not a percentage.
    #[error("unexpected capacity value {0:?}")]
    InvalidCapacity(String),
}

impl From<SysfsError> for BattmError {
    fn from(err: SysfsError) -> Self {
        Self::SensorUnavailable(Box::new(err))
    }
}
