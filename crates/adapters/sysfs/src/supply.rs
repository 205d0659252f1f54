//! Power-supply attribute parsing.
//!
//! Each supply is a directory of one-value text files (`type`, `capacity`,
//! `online`, `status`, …). Parsing is kept free of IO so it can be tested
//! on plain strings.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::SysfsError;

/// The `type` attribute, reduced to what the sensor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SupplyKind {
    Battery,
    /// Wall adapter or USB power source.
    External,
    Other,
}

impl SupplyKind {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Battery" => Self::Battery,
            "Mains" => Self::External,
            kind if kind.starts_with("USB") => Self::External,
            _ => Self::Other,
        }
    }
}

/// One entry under the power-supply root.
#[derive(Debug, Clone)]
pub(crate) struct Supply {
    pub name: String,
    pub dir: PathBuf,
    pub kind: SupplyKind,
    /// `scope == "Device"` marks peripherals (mice, headsets) rather than
    /// the machine's own supplies.
    pub peripheral: bool,
}

/// Parse the `capacity` attribute into a percent.
pub(crate) fn parse_capacity(raw: &str) -> Result<u8, SysfsError> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| SysfsError::InvalidCapacity(raw.trim().to_string()))
}

/// Parse the `online` attribute of an external supply.
pub(crate) fn parse_online(raw: &str) -> bool {
    raw.trim() == "1"
}

/// Whether a battery `status` implies external power is connected.
pub(crate) fn status_implies_plugged(raw: &str) -> bool {
    matches!(raw.trim(), "Charging" | "Full" | "Not charging")
}

/// Read one attribute, or `None` when the file does not exist.
pub(crate) async fn read_attr(dir: &Path, name: &str) -> io::Result<Option<String>> {
    match tokio::fs::read_to_string(dir.join(name)).await {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// List every supply under `root`, sorted by name.
pub(crate) async fn list(root: &Path) -> io::Result<Vec<Supply>> {
    let mut entries = tokio::fs::read_dir(root).await?;
    let mut supplies = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let dir = entry.path();
        let Some(raw_kind) = read_attr(&dir, "type").await? else {
            continue;
        };
        let peripheral = read_attr(&dir, "scope")
            .await?
            .is_some_and(|scope| scope.trim() == "Device");
        supplies.push(Supply {
            name: entry.file_name().to_string_lossy().into_owned(),
            dir,
            kind: SupplyKind::parse(&raw_kind),
            peripheral,
        });
    }
    supplies.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(supplies)
}

/// Whether a battery reports itself as physically present.
pub(crate) async fn is_present(dir: &Path) -> io::Result<bool> {
    Ok(read_attr(dir, "present")
        .await?
        .is_none_or(|present| present.trim() != "0"))
}
