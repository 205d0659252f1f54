//! Configuration loading: TOML file with environment variable overrides.
//!
//! Reads `battm.toml` from the working directory, or the file named by
//! `BATTM_CONFIG`. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use battm_adapter_desktop::DesktopConfig;
use battm_adapter_sysfs::SysfsConfig;
use battm_adapter_virtual::VirtualConfig;
use battm_app::monitor::MonitorConfig;
use battm_domain::policy::RepeatPolicy;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "battm.toml";

/// Longest accepted banner timeout. Zero is rejected as well, since
/// notification servers read it as "never expire".
const MAX_BANNER_TIMEOUT_SECS: u32 = 60;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threshold monitor schedule.
    pub monitor: MonitorSection,
    /// Battery level display refresh.
    pub display: DisplayConfig,
    /// Where charge bounds are persisted.
    pub settings: SettingsConfig,
    /// Battery sensor selection.
    pub sensor: SensorConfig,
    /// Desktop notification channels.
    pub notifier: DesktopConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Terminal settings surface.
    pub console: ConsoleConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorSection {
    /// Seconds between two threshold checks.
    pub interval_secs: u64,
    /// Seconds one sensor read may take before the cycle is skipped.
    pub sensor_timeout_secs: u64,
    /// Whether an unchanged condition re-alerts every cycle.
    pub repeat: RepeatPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Seconds between two battery level refreshes.
    pub refresh_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// JSON file holding the charge bounds.
    pub path: PathBuf,
}

/// Which battery sensor backs the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorSource {
    /// Linux `/sys/class/power_supply`.
    #[default]
    Sysfs,
    /// Simulated battery, for demos and machines without one.
    Virtual,
}

impl std::str::FromStr for SensorSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sysfs" => Ok(Self::Sysfs),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!(
                "unknown sensor source `{other}` (expected `sysfs` or `virtual`)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub source: SensorSource,
    pub sysfs: SysfsConfig,
    #[serde(rename = "virtual")]
    pub virtual_battery: VirtualConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Read commands from stdin.
    pub enabled: bool,
}

impl Config {
    /// Load configuration from `battm.toml` (or `BATTM_CONFIG`) if present,
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("BATTM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("BATTM_SETTINGS_PATH") {
            self.settings.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("BATTM_SENSOR") {
            self.sensor.source = val.parse()?;
        }
        if let Ok(val) = std::env::var("BATTM_MONITOR_INTERVAL_SECS")
            && let Ok(secs) = val.parse()
        {
            self.monitor.interval_secs = secs;
        }
        if let Ok(val) = std::env::var("BATTM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "monitor.interval_secs must be non-zero".to_string(),
            ));
        }
        if self.monitor.sensor_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "monitor.sensor_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.display.refresh_secs == 0 {
            return Err(ConfigError::Validation(
                "display.refresh_secs must be non-zero".to_string(),
            ));
        }
        if !(1..=MAX_BANNER_TIMEOUT_SECS).contains(&self.notifier.banner_timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "notifier.banner_timeout_secs must be between 1 and {MAX_BANNER_TIMEOUT_SECS}"
            )));
        }
        if self.notifier.sound_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "notifier.sound_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.settings.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "settings.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Schedule for the threshold monitor.
    #[must_use]
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_secs(self.monitor.interval_secs),
            sensor_timeout: self.sensor_timeout(),
            repeat: self.monitor.repeat,
        }
    }

    #[must_use]
    pub fn display_interval(&self) -> Duration {
        Duration::from_secs(self.display.refresh_secs)
    }

    #[must_use]
    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_secs(self.monitor.sensor_timeout_secs)
    }
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            sensor_timeout_secs: 5,
            repeat: RepeatPolicy::EveryCycle,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { refresh_secs: 10 }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("settings.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "battmd=info,battm=info".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
