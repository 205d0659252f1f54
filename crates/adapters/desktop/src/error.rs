//! Desktop notifier error types.

use std::process::ExitStatus;
use std::time::Duration;

use battm_domain::error::BattmError;

/// Errors specific to the desktop notifier.
#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    /// The notification daemon rejected or never received the banner.
    #[error("failed to show desktop banner")]
    Banner(#[from] notify_rust::error::Error),

    /// The blocking banner task panicked or was cancelled.
    #[error("banner task did not complete")]
    Join(#[from] tokio::task::JoinError),

    /// The sound player could not be started.
    #[error("failed to start sound player")]
    SoundSpawn(#[source] std::io::Error),

    /// The sound player exited unsuccessfully.
    #[error("sound player exited with {0}")]
    SoundExit(ExitStatus),

    /// The sound player ran past its time limit and was killed.
    #[error("sound player timed out after {0:?}")]
    SoundTimeout(Duration),
}

impl From<DesktopError> for BattmError {
    fn from(err: DesktopError) -> Self {
        Self::Notification(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_sound_timeout() {
        let err = DesktopError::SoundTimeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "sound player timed out after 1.5s");
    }

    #[test]
    fn should_convert_to_notification_error() {
        let err: BattmError = DesktopError::SoundTimeout(Duration::from_secs(1)).into();
        assert!(matches!(err, BattmError::Notification(_)));
    }
}
