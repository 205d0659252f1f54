//! Bounded sensor reads shared by the monitor loop and the display refresh.

use std::time::Duration;

use battm_domain::error::BattmError;
use battm_domain::sample::Sample;

use crate::ports::BatterySensor;

/// The sensor did not answer within the allotted time.
#[derive(Debug, thiserror::Error)]
#[error("battery sensor did not answer within {0:?}")]
pub struct SensorTimeout(pub Duration);

/// Read `sensor`, giving up after `timeout`.
///
/// A stuck read becomes [`BattmError::SensorUnavailable`] so the caller's
/// schedule is never stalled.
///
/// # Errors
///
/// Propagates the sensor's own error, or returns
/// [`BattmError::SensorUnavailable`] wrapping [`SensorTimeout`].
pub async fn read_with_timeout<S: BatterySensor>(
    sensor: &S,
    timeout: Duration,
) -> Result<Sample, BattmError> {
    match tokio::time::timeout(timeout, sensor.read()).await {
        Ok(result) => result,
        Err(_) => {
            let elapsed = SensorTimeout(timeout);
            Err(BattmError::SensorUnavailable(Box::new(elapsed)))
        }
    }
}
