//! Battery sensor port: where samples come from.

use std::future::Future;
use std::sync::Arc;

use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

/// Reads the current battery state.
///
/// Implementations must be safe to call concurrently: the monitor loop and
/// the display refresh poll independently.
pub trait BatterySensor {
    /// Read one fresh sample.
    ///
    /// Returns [`BattmError::SensorUnavailable`] when no battery is present
    /// or the platform cannot be queried.
    fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send;
}

impl<T: BatterySensor + Send + Sync> BatterySensor for Arc<T> {
    fn read(&self) -> impl Future<Output = Result<Sample, BattmError>> + Send {
        (**self).read()
    }
}
