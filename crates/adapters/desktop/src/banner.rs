//! Transient desktop banner via the platform notification service.

use notify_rust::{Notification, Timeout};

use crate::config::DesktopConfig;
use crate::error::DesktopError;

/// Show `message` as a self-dismissing banner.
///
/// `show()` talks to the notification daemon synchronously, so it runs on
/// the blocking pool.
pub(crate) async fn show(config: &DesktopConfig, message: &str) -> Result<(), DesktopError> {
    let mut notification = Notification::new();
    notification
        .appname(&config.app_name)
        .summary(&config.summary)
        .body(message)
        .icon(&config.icon)
        .timeout(Timeout::Milliseconds(
            config.banner_timeout_secs.saturating_mul(1000),
        ));

    tokio::task::spawn_blocking(move || notification.show().map(drop)).await??;
    Ok(())
}
