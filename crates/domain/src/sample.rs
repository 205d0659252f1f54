//! Sample: one instantaneous battery reading.

use serde::Serialize;

/// Battery percent and power-supply state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    percent: u8,
    power_plugged: bool,
}

impl Sample {
    /// Build a sample, clamping `percent` to 100.
    ///
    /// Some firmwares report a capacity slightly above 100 while topping up.
    #[must_use]
    pub fn new(percent: u8, power_plugged: bool) -> Self {
        Self {
            percent: percent.min(100),
            power_plugged,
        }
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn power_plugged(&self) -> bool {
        self.power_plugged
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let supply = if self.power_plugged {
            "plugged"
        } else {
            "on battery"
        };
        write!(f, "{}% ({supply})", self.percent)
    }
}
