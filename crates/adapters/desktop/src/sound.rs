//! Audible alert via an external player command.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::config::DesktopConfig;
use crate::error::DesktopError;

/// Run the configured player and wait for it, bounded by its timeout.
///
/// The child is killed if the timeout elapses.
pub(crate) async fn play(config: &DesktopConfig) -> Result<(), DesktopError> {
    let limit = Duration::from_millis(config.sound_timeout_ms);
    let status = Command::new(&config.sound_command)
        .args(&config.sound_args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .status();

    let status = tokio::time::timeout(limit, status)
        .await
        .map_err(|_| DesktopError::SoundTimeout(limit))?
        .map_err(DesktopError::SoundSpawn)?;

    if !status.success() {
        return Err(DesktopError::SoundExit(status));
    }
    Ok(())
}
