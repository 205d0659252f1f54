//! Battery gauge: the latest battery reading, for anything that displays it.
//!
//! [`DisplayRefresh`] polls the sensor on its own, faster cadence and
//! forwards each reading to a [`DisplaySink`]. [`BatteryGauge`] is the
//! in-process sink backed by a tokio [`watch`] channel; readers always see
//! the most recent value and never block the refresh.

use std::time::Duration;

use battm_domain::sample::Sample;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::{BatterySensor, DisplaySink};
use crate::sampling::read_with_timeout;

/// Latest-value holder for the displayed battery reading.
///
/// `None` means no reading yet, or the last read failed.
pub struct BatteryGauge {
    sender: watch::Sender<Option<Sample>>,
}

impl Default for BatteryGauge {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl BatteryGauge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to reading changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Sample>> {
        self.sender.subscribe()
    }

}

impl DisplaySink for BatteryGauge {
    fn publish(&self, sample: Option<Sample>) {
        self.sender.send_replace(sample);
    }
}

/// Render a reading the way the status line shows it.
#[must_use]
pub fn format_level(sample: Option<Sample>) -> String {
    match sample {
        Some(sample) => format!("Battery: {}%", sample.percent()),
        None => "Battery: --%".to_string(),
    }
}

/// Periodic read-and-forward of the battery level. No policy, no side
/// effects on the bounds.
pub struct DisplayRefresh<S, D> {
    sensor: S,
    sink: D,
    interval: Duration,
    sensor_timeout: Duration,
}

impl<S, D> DisplayRefresh<S, D>
where
    S: BatterySensor + Send + Sync + 'static,
    D: DisplaySink + Send + Sync + 'static,
{
    pub fn new(sensor: S, sink: D, interval: Duration, sensor_timeout: Duration) -> Self {
        Self {
            sensor,
            sink,
            interval,
            sensor_timeout,
        }
    }

    /// Spawn the refresh task. The first refresh runs immediately.
    pub fn start(self) -> JoinHandle<()> {
        tracing::debug!(
            interval_secs = self.interval.as_secs(),
            "battery display refresh started"
        );
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.refresh().await;
        }
    }

    /// Read the sensor once and publish the result.
    pub async fn refresh(&self) -> Option<Sample> {
        let sample = match read_with_timeout(&self.sensor, self.sensor_timeout).await {
            Ok(sample) => Some(sample),
            Err(err) => {
                tracing::debug!(error = ?err, "battery level unavailable for display");
                None
            }
        };
        self.sink.publish(sample);
        sample
    }
}
