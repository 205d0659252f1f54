//! Runtime choice between the sensor adapters.

use battm_adapter_sysfs::SysfsBattery;
use battm_adapter_virtual::VirtualBattery;
use battm_app::ports::BatterySensor;
use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

use crate::config::{SensorConfig, SensorSource};

/// The sensor selected by configuration.
#[derive(Debug)]
pub enum AnySensor {
    Sysfs(SysfsBattery),
    Virtual(VirtualBattery),
}

impl AnySensor {
    #[must_use]
    pub fn from_config(config: &SensorConfig) -> Self {
        match config.source {
            SensorSource::Sysfs => Self::Sysfs(SysfsBattery::new(config.sysfs.clone())),
            SensorSource::Virtual => Self::Virtual(VirtualBattery::new(&config.virtual_battery)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sysfs(_) => "sysfs",
            Self::Virtual(_) => "virtual",
        }
    }
}

impl BatterySensor for AnySensor {
    async fn read(&self) -> Result<Sample, BattmError> {
        match self {
            Self::Sysfs(sensor) => sensor.read().await,
            Self::Virtual(sensor) => sensor.read().await,
        }
    }
}
