//! # battm-adapter-sysfs
//!
//! Battery sensor for Linux, reading the kernel's power-supply class.
//!
//! ## How it works
//!
//! | Value | Source |
//! |-------|--------|
//! | percent | `<battery>/capacity` |
//! | plugged | any `Mains`/`USB*` supply with `online == 1` |
//! | plugged (fallback) | `<battery>/status` is `Charging`, `Full` or `Not charging` |
//!
//! The fallback applies only when the machine exposes no external supply.
//! Peripheral supplies (`scope == Device`) are ignored.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `battm-app` and `battm-domain`.

mod config;
mod error;
mod supply;

pub use config::SysfsConfig;
pub use error::SysfsError;

use std::future::Future;

use battm_app::ports::BatterySensor;
use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

use supply::{Supply, SupplyKind};

/// [`BatterySensor`] backed by `/sys/class/power_supply`.
#[derive(Debug, Clone)]
pub struct SysfsBattery {
    config: SysfsConfig,
}

impl SysfsBattery {
    #[must_use]
    pub fn new(config: SysfsConfig) -> Self {
        Self { config }
    }

    async fn sample(&self) -> Result<Sample, SysfsError> {
        let supplies = supply::list(&self.config.root).await?;
        let battery = self.find_battery(&supplies).await?;

        let raw_capacity = supply::read_attr(&battery.dir, "capacity")
            .await?
            .ok_or_else(|| SysfsError::BatteryMissing(battery.name.clone()))?;
        let percent = supply::parse_capacity(&raw_capacity)?;

        let power_plugged = Self::power_plugged(battery, &supplies).await?;

        Ok(Sample::new(percent, power_plugged))
    }

    async fn find_battery<'a>(&self, supplies: &'a [Supply]) -> Result<&'a Supply, SysfsError> {
        if let Some(name) = &self.config.battery {
            let battery = supplies
                .iter()
                .find(|s| &s.name == name)
                .ok_or_else(|| SysfsError::BatteryMissing(name.clone()))?;
            if !supply::is_present(&battery.dir).await? {
                return Err(SysfsError::BatteryMissing(name.clone()));
            }
            return Ok(battery);
        }

        for candidate in supplies
            .iter()
            .filter(|s| s.kind == SupplyKind::Battery && !s.peripheral)
        {
            if supply::is_present(&candidate.dir).await? {
                return Ok(candidate);
            }
        }
        Err(SysfsError::NoBattery {
            root: self.config.root.clone(),
        })
    }

    async fn power_plugged(battery: &Supply, supplies: &[Supply]) -> Result<bool, SysfsError> {
        let mut saw_external = false;
        for external in supplies
            .iter()
            .filter(|s| s.kind == SupplyKind::External && !s.peripheral)
        {
            saw_external = true;
            let online = supply::read_attr(&external.dir, "online").await?;
            if online.is_some_and(|o| supply::parse_online(&o)) {
                return Ok(true);
            }
        }
        if saw_external {
            return Ok(false);
        }

        let status = supply::read_attr(&battery.dir, "status").await?;
        Ok(status.is_some_and(|s| supply::status_implies_plugged(&s)))
    }
}

impl BatterySensor for SysfsBattery {
    fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send {
        let battery = self.clone();
        async move {
            let sample = battery.sample().await?;
            tracing::trace!(
                percent = sample.percent(),
                power_plugged = sample.power_plugged(),
                "sysfs battery read"
            );
            Ok(sample)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn supply(root: &Path, name: &str, attrs: &[(&str, &str)]) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            std::fs::write(dir.join(attr), format!("{value}\n")).unwrap();
        }
    }

    fn battery(root: &Path, name: &str, capacity: &str) {
        supply(root, name, &[("type", "Battery"), ("capacity", capacity)]);
    }

    fn sensor(root: &Path) -> SysfsBattery {
        SysfsBattery::new(SysfsConfig {
            root: root.to_path_buf(),
            battery: None,
        })
    }

    #[tokio::test]
    async fn should_read_capacity_and_mains_online() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "AC", &[("type", "Mains"), ("online", "1")]);
        battery(root.path(), "BAT0", "91");
        supply(root.path(), "BAT0", &[("status", "Charging")]);

        let sample = sensor(root.path()).read().await.unwrap();

        assert_eq!(sample, Sample::new(91, true));
    }

    #[tokio::test]
    async fn should_report_unplugged_when_mains_offline() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "AC", &[("type", "Mains"), ("online", "0")]);
        battery(root.path(), "BAT0", "14");
        supply(root.path(), "BAT0", &[("status", "Full")]);

        let sample = sensor(root.path()).read().await.unwrap();

        assert_eq!(sample, Sample::new(14, false));
    }

    #[tokio::test]
    async fn should_detect_usb_c_power() {
        let root = tempfile::tempdir().unwrap();
        let usb = [("type", "USB_C"), ("online", "1")];
        supply(root.path(), "ucsi-source-psy-0", &usb);
        battery(root.path(), "BAT0", "60");

        let sample = sensor(root.path()).read().await.unwrap();

        assert!(sample.power_plugged());
    }

    #[tokio::test]
    async fn should_fall_back_to_status_without_external_supply() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "BAT0", "70");
        supply(root.path(), "BAT0", &[("status", "Discharging")]);
        assert!(!sensor(root.path()).read().await.unwrap().power_plugged());

        supply(root.path(), "BAT0", &[("status", "Not charging")]);
        assert!(sensor(root.path()).read().await.unwrap().power_plugged());
    }

    #[tokio::test]
    async fn should_ignore_peripheral_batteries() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "AAA-mouse", "5");
        supply(root.path(), "AAA-mouse", &[("scope", "Device")]);
        battery(root.path(), "BAT0", "55");

        let sample = sensor(root.path()).read().await.unwrap();

        assert_eq!(sample.percent(), 55);
    }

    #[tokio::test]
    async fn should_skip_absent_battery() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "BAT0", "0");
        supply(root.path(), "BAT0", &[("present", "0")]);
        battery(root.path(), "BAT1", "77");

        let sample = sensor(root.path()).read().await.unwrap();

        assert_eq!(sample.percent(), 77);
    }

    #[tokio::test]
    async fn should_use_configured_battery() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "BAT0", "10");
        battery(root.path(), "BAT1", "66");
        let sensor = SysfsBattery::new(SysfsConfig {
            root: root.path().to_path_buf(),
            battery: Some("BAT1".to_string()),
        });

        assert_eq!(sensor.read().await.unwrap().percent(), 66);
    }

    #[tokio::test]
    async fn should_be_unavailable_without_battery() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "AC", &[("type", "Mains"), ("online", "1")]);

        let result = sensor(root.path()).read().await;

        assert!(matches!(result, Err(BattmError::SensorUnavailable(_))));
    }

    #[tokio::test]
    async fn should_be_unavailable_when_root_missing() {
        let root = tempfile::tempdir().unwrap();
        let result = sensor(&root.path().join("nope")).read().await;
        assert!(matches!(result, Err(BattmError::SensorUnavailable(_))));
    }

    #[tokio::test]
    async fn should_be_unavailable_on_garbage_capacity() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "BAT0", "lots");

        let result = sensor(root.path()).read().await;

        assert!(matches!(result, Err(BattmError::SensorUnavailable(_))));
    }

    #[tokio::test]
    async fn should_be_unavailable_when_configured_battery_missing() {
        let root = tempfile::tempdir().unwrap();
        battery(root.path(), "BAT0", "50");
        let sensor = SysfsBattery::new(SysfsConfig {
            root: root.path().to_path_buf(),
            battery: Some("BAT9".to_string()),
        });

        assert!(matches!(
            sensor.read().await,
            Err(BattmError::SensorUnavailable(_))
        ));
    }
}
