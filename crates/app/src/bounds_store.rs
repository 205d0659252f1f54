//! Bounds store: the single shared, mutable pair of charge thresholds.
//!
//! Reads take a short `RwLock` read guard and copy the value out. Writes are
//! validated first, then serialized through an async gate held across the
//! in-memory swap and the durable save, so the persisted pair always matches
//! the last applied one.

use std::sync::{PoisonError, RwLock};

use battm_domain::bounds::{Bounds, BoundsCandidate};
use battm_domain::error::{BattmError, ValidationError};
use tokio::sync::Mutex;

use crate::ports::SettingsRepository;

/// Whether a successful [`BoundsStore::set`] also reached durable storage.
#[derive(Debug)]
#[must_use]
pub enum SaveStatus {
    /// Applied in memory and saved.
    Persisted,
    /// Applied in memory, but the save failed. The bounds stay active for
    /// this process; the error is a warning for the user.
    NotPersisted(BattmError),
}

/// Owns the active [`Bounds`] and their persistence.
pub struct BoundsStore<R> {
    current: RwLock<Bounds>,
    write_gate: Mutex<()>,
    repo: R,
}

impl<R: SettingsRepository> BoundsStore<R> {
    /// Create a store starting from `initial`, without touching storage.
    pub fn new(repo: R, initial: Bounds) -> Self {
        Self {
            current: RwLock::new(initial),
            write_gate: Mutex::new(()),
            repo,
        }
    }

    /// Create a store from the persisted bounds.
    ///
    /// Falls back to [`Bounds::default`] when nothing was saved, when the
    /// saved pair is invalid, or when storage cannot be read.
    pub async fn open(repo: R) -> Self {
        let initial = match repo.load().await {
            Ok(Some(bounds)) => {
                tracing::info!(%bounds, "loaded persisted charge bounds");
                bounds
            }
            Ok(None) => {
                tracing::info!(
                    bounds = %Bounds::default(),
                    "no persisted charge bounds, using defaults"
                );
                Bounds::default()
            }
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load charge bounds, using defaults");
                Bounds::default()
            }
        };
        Self::new(repo, initial)
    }

    /// Return the active bounds.
    #[must_use]
    pub fn get(&self) -> Bounds {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate `candidate` and, if valid, make it the active pair and save it.
    ///
    /// All-or-nothing: on a validation failure the store is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] or
    /// [`ValidationError::MinNotLessThanMax`]. A failed save is *not* an
    /// error; see [`SaveStatus::NotPersisted`].
    pub async fn set(&self, candidate: BoundsCandidate) -> Result<SaveStatus, ValidationError> {
        let bounds = Bounds::try_from(candidate)?;

        let _gate = self.write_gate.lock().await;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = bounds;
        tracing::info!(%bounds, "charge bounds updated");

        match self.repo.save(bounds).await {
            Ok(()) => Ok(SaveStatus::Persisted),
            Err(err) => {
                tracing::warn!(error = ?err, "charge bounds applied but not persisted");
                Ok(SaveStatus::NotPersisted(err))
            }
        }
    }
}
