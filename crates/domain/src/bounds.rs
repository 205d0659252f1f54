//! Bounds: the user-configured charge threshold pair.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default lower threshold, in percent.
pub const DEFAULT_MIN_CHARGE: u8 = 20;
/// Default upper threshold, in percent.
pub const DEFAULT_MAX_CHARGE: u8 = 85;

/// A validated `(min_charge, max_charge)` pair.
///
/// Always satisfies `0 <= min_charge < max_charge <= 100`; the only way to
/// build one is through [`Bounds::new`] (or deserialization, which goes
/// through the same check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoundsCandidate", into = "BoundsCandidate")]
pub struct Bounds {
    min_charge: u8,
    max_charge: u8,
}

impl Bounds {
    /// Validate a pair and build [`Bounds`] from it.
    ///
    /// Both values are range-checked before their ordering is.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when either value is outside
    /// `0..=100`, or [`ValidationError::MinNotLessThanMax`] when
    /// `min >= max`.
    pub fn new(min: i64, max: i64) -> Result<Self, ValidationError> {
        let min_charge = to_percent(min)?;
        let max_charge = to_percent(max)?;
        if min_charge >= max_charge {
            return Err(ValidationError::MinNotLessThanMax {
                min: min_charge,
                max: max_charge,
            });
        }
        Ok(Self {
            min_charge,
            max_charge,
        })
    }

    #[must_use]
    pub fn min_charge(&self) -> u8 {
        self.min_charge
    }

    #[must_use]
    pub fn max_charge(&self) -> u8 {
        self.max_charge
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_charge: DEFAULT_MIN_CHARGE,
            max_charge: DEFAULT_MAX_CHARGE,
        }
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "min {}% / max {}%", self.min_charge, self.max_charge)
    }
}

fn to_percent(value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or(ValidationError::OutOfRange)
}

/// An unvalidated pair, as typed by a user or read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsCandidate {
    pub max_charge: i64,
    pub min_charge: i64,
}

impl BoundsCandidate {
    #[must_use]
    pub fn new(min_charge: i64, max_charge: i64) -> Self {
        Self {
            max_charge,
            min_charge,
        }
    }

    /// Parse user-typed text into a candidate.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when either text is not an
    /// integer.
    pub fn parse(min: &str, max: &str) -> Result<Self, ValidationError> {
        let parse = |text: &str| {
            text.trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::OutOfRange)
        };
        Ok(Self::new(parse(min)?, parse(max)?))
    }
}

impl TryFrom<BoundsCandidate> for Bounds {
    type Error = ValidationError;

    fn try_from(candidate: BoundsCandidate) -> Result<Self, Self::Error> {
        Self::new(candidate.min_charge, candidate.max_charge)
    }
}

impl From<Bounds> for BoundsCandidate {
    fn from(bounds: Bounds) -> Self {
        Self::new(i64::from(bounds.min_charge), i64::from(bounds.max_charge))
    }
}
