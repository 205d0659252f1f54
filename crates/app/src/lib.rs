//! # battm-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BatterySensor`: read one battery sample
//!   - `Notifier`: deliver an alert (sound + banner)
//!   - `SettingsRepository`: load & save the charge bounds
//!   - `DisplaySink`: receive the latest sample for display
//! - Define **use-cases** driven by the daemon and the settings surface:
//!   - `BoundsStore`: validated, lock-guarded charge bounds
//!   - `MonitorLoop`: periodic threshold evaluation and alert dispatch
//!   - `DisplayRefresh`: periodic read-and-forward of the battery level
//! - Provide **in-process infrastructure** (`BatteryGauge`) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `battm-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod bounds_store;
pub mod gauge;
pub mod monitor;
pub mod ports;
pub mod sampling;
