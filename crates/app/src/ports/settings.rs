//! Settings repository port: durable storage for the charge bounds.

use std::future::Future;
use std::sync::Arc;

use battm_domain::bounds::Bounds;
use battm_domain::error::BattmError;

/// Loads and saves the persisted [`Bounds`].
pub trait SettingsRepository {
    /// Load the persisted bounds, or `None` when nothing was ever saved.
    fn load(&self) -> impl Future<Output = Result<Option<Bounds>, BattmError>> + Send;

    /// Persist `bounds`, replacing whatever was stored before.
    fn save(&self, bounds: Bounds) -> impl Future<Output = Result<(), BattmError>> + Send;
}

impl<T: SettingsRepository + Send + Sync> SettingsRepository for Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Option<Bounds>, BattmError>> + Send {
        (**self).load()
    }

    fn save(&self, bounds: Bounds) -> impl Future<Output = Result<(), BattmError>> + Send {
        (**self).save(bounds)
    }
}
