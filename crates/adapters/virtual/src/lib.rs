//! # battm-adapter-virtual
//!
//! Virtual/demo battery that provides simulated readings for testing and
//! demonstration purposes.
//!
//! | Setting | Behaviour |
//! |---------|-----------|
//! | `percent` | Starting charge level |
//! | `power_plugged` | Starting supply state |
//! | `drift_per_read` | Percent gained per read while plugged, lost while not |
//! | `flip_at_limits` | Unplug at 100 %, plug back in at 0 % |
//!
//! The battery can also be switched "off" to exercise the
//! sensor-unavailable path.
//!
//! ## Dependency rule
//!
//! Depends on `battm-app` (port traits) and `battm-domain` only.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;

use battm_app::ports::BatterySensor;
use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

/// Configuration for the virtual battery.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    pub percent: u8,
    pub power_plugged: bool,
    pub drift_per_read: u8,
    pub flip_at_limits: bool,
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            percent: 50,
            power_plugged: false,
            drift_per_read: 0,
            flip_at_limits: true,
        }
    }
}

/// The virtual battery is switched off.
#[derive(Debug, thiserror::Error)]
#[error("virtual battery is unavailable")]
pub struct VirtualUnavailable;

#[derive(Debug)]
struct State {
    percent: u8,
    power_plugged: bool,
    available: bool,
}

/// Simulated battery implementing [`BatterySensor`].
#[derive(Debug)]
pub struct VirtualBattery {
    state: Mutex<State>,
    drift_per_read: u8,
    flip_at_limits: bool,
}

impl Default for VirtualBattery {
    fn default() -> Self {
        Self::new(&VirtualConfig::default())
    }
}

impl VirtualBattery {
    #[must_use]
    pub fn new(config: &VirtualConfig) -> Self {
        Self {
            state: Mutex::new(State {
                percent: config.percent.min(100),
                power_plugged: config.power_plugged,
                available: true,
            }),
            drift_per_read: config.drift_per_read,
            flip_at_limits: config.flip_at_limits,
        }
    }

    /// A static battery at `percent` that never drifts.
    #[must_use]
    pub fn fixed(percent: u8, power_plugged: bool) -> Self {
        Self::new(&VirtualConfig {
            percent,
            power_plugged,
            drift_per_read: 0,
            flip_at_limits: false,
        })
    }

    /// Switch the battery on or off; reads fail while off.
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_sample(&self) -> Result<Sample, VirtualUnavailable> {
        let mut state = self.lock();
        if !state.available {
            return Err(VirtualUnavailable);
        }
        let sample = Sample::new(state.percent, state.power_plugged);

        if state.power_plugged {
            state.percent = state.percent.saturating_add(self.drift_per_read).min(100);
            if self.flip_at_limits && state.percent == 100 {
                state.power_plugged = false;
            }
        } else {
            state.percent = state.percent.saturating_sub(self.drift_per_read);
            if self.flip_at_limits && state.percent == 0 {
                state.power_plugged = true;
            }
        }
        Ok(sample)
    }
}

impl BatterySensor for VirtualBattery {
    fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send {
        let result = self
            .next_sample()
            .map_err(|err| BattmError::SensorUnavailable(Box::new(err)));
        async { result }
    }
}
