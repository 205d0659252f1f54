//! Notifier port: delivers alerts to the user.

use std::future::Future;
use std::sync::Arc;

use battm_domain::alert::NotificationEvent;
use battm_domain::error::BattmError;

/// Delivers a [`NotificationEvent`] (audible alert plus transient banner).
///
/// The banner's dismissal timer and any animation belong to the
/// implementation; the caller never waits for the user.
pub trait Notifier {
    /// Deliver one alert.
    ///
    /// Implementations should attempt every channel they own even when one
    /// fails, and return [`BattmError::Notification`] only when nothing got
    /// through.
    fn notify(
        &self,
        event: &NotificationEvent,
    ) -> impl Future<Output = Result<(), BattmError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for Arc<T> {
    fn notify(
        &self,
        event: &NotificationEvent,
    ) -> impl Future<Output = Result<(), BattmError>> + Send {
        (**self).notify(event)
    }
}
