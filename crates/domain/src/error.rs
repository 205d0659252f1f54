//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`BattmError`]
//! via `From` when crossing a port boundary.

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every port in the system.
///
/// None of these is fatal to the process: callers log and carry on.
#[derive(Debug, thiserror::Error)]
pub enum BattmError {
    /// A candidate value broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The battery sensor could not produce a sample (no battery, read
    /// failure, timeout).
    #[error("battery sensor unavailable")]
    SensorUnavailable(#[source] BoxError),

    /// Durable settings storage failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The sound or visual alert could not be delivered.
    #[error("notification dispatch failed")]
    Notification(#[source] BoxError),
}

/// Invariant violations for user-supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A value is not an integer or falls outside `0..=100`.
    #[error("charge values must be whole numbers between 0 and 100")]
    OutOfRange,

    /// Both values are in range but `min` is not strictly below `max`.
    #[error("min charge ({min}%) must be less than max charge ({max}%)")]
    MinNotLessThanMax { min: u8, max: u8 },
}
