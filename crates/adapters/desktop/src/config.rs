//! Desktop notifier configuration.

use serde::Deserialize;

/// Configuration for the desktop notifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Show a desktop banner.
    pub banner_enabled: bool,
    /// Application name reported to the notification daemon.
    pub app_name: String,
    /// Banner title; the alert message is the body.
    pub summary: String,
    /// Freedesktop icon name or path.
    pub icon: String,
    /// How long the banner stays up before dismissing itself, in seconds.
    pub banner_timeout_secs: u32,
    /// Play an audible alert.
    pub sound_enabled: bool,
    /// Player executable.
    pub sound_command: String,
    /// Arguments passed to `sound_command`.
    pub sound_args: Vec<String>,
    /// Upper bound on the player's run time, in milliseconds.
    pub sound_timeout_ms: u64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            banner_enabled: true,
            app_name: "battm".to_string(),
            summary: "Battery Monitor".to_string(),
            icon: "battery-caution".to_string(),
            banner_timeout_secs: 10,
            sound_enabled: true,
            sound_command: "canberra-gtk-play".to_string(),
            sound_args: vec!["--id".to_string(), "dialog-warning".to_string()],
            sound_timeout_ms: 5_000,
        }
    }
}
