//! # battm-adapter-desktop
//!
//! Notification adapter: a transient desktop banner plus an audible alert.
//!
//! Both channels run concurrently and independently. A failed sound never
//! stops the banner and vice versa; the call only fails when every enabled
//! channel failed. The banner's dismissal timer (and any fade-in) belongs
//! to the desktop notification daemon.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `battm-app` and `battm-domain`.

mod banner;
mod config;
mod error;
mod sound;

pub use config::DesktopConfig;
pub use error::DesktopError;

use std::future::Future;

use battm_app::ports::Notifier;
use battm_domain::alert::NotificationEvent;
use battm_domain::error::BattmError;

/// [`Notifier`] that shows a desktop banner and plays a sound.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    config: DesktopConfig,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new(config: DesktopConfig) -> Self {
        Self { config }
    }

    async fn sound(&self) -> Option<Result<(), DesktopError>> {
        if !self.config.sound_enabled {
            return None;
        }
        Some(sound::play(&self.config).await)
    }

    async fn banner(&self, message: &str) -> Option<Result<(), DesktopError>> {
        if !self.config.banner_enabled {
            return None;
        }
        Some(banner::show(&self.config, message).await)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(
        &self,
        event: &NotificationEvent,
    ) -> impl Future<Output = Result<(), BattmError>> + Send {
        let notifier = self.clone();
        let event = event.clone();
        async move {
            let (sound, banner) = tokio::join!(notifier.sound(), notifier.banner(&event.message));

            let mut delivered = false;
            let mut failures = Vec::new();
            for (channel, outcome) in [("sound", sound), ("banner", banner)] {
                match outcome {
                    Some(Ok(())) => delivered = true,
                    Some(Err(err)) => {
                        tracing::warn!(
                            alert_id = %event.id,
                            channel,
                            error = ?err,
                            "alert channel failed"
                        );
                        failures.push(err);
                    }
                    None => {}
                }
            }

            if failures.is_empty() && !delivered {
                tracing::info!(
                    alert_id = %event.id,
                    message = %event.message,
                    "battery alert (no desktop channel enabled)"
                );
            }
            match failures.into_iter().next() {
                Some(err) if !delivered => Err(err.into()),
                _ => Ok(()),
            }
        }
    }
}
