//! Display sink port: receives the latest battery reading for display.

use std::sync::Arc;

use battm_domain::sample::Sample;

/// Anything that shows the current battery level.
pub trait DisplaySink {
    /// Replace the displayed reading. `None` means the sensor is unavailable.
    fn publish(&self, sample: Option<Sample>);
}

impl<T: DisplaySink> DisplaySink for Arc<T> {
    fn publish(&self, sample: Option<Sample>) {
        (**self).publish(sample);
    }
}
