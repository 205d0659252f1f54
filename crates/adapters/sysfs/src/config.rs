//! Sysfs sensor configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the sysfs battery sensor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SysfsConfig {
    /// Power-supply class directory.
    pub root: PathBuf,
    /// Battery directory name (e.g. `"BAT1"`).
    ///
    /// When unset, the first present system battery is used.
    pub battery: Option<String>,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/sys/class/power_supply"),
            battery: None,
        }
    }
}
