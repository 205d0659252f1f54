//! # battm-adapter-storage-json
//!
//! Settings persistence backed by a small JSON file:
//!
//! ```json
//! { "max_charge": 85, "min_charge": 20 }
//! ```
//!
//! A missing file means "never saved". A key missing from the file falls
//! back to that key's default. Saves go to a sibling temporary file that is
//! then renamed over the target, so a crash never leaves a truncated file.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `battm-app` and `battm-domain`.

mod error;

pub use error::StorageError;

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use battm_app::ports::SettingsRepository;
use battm_domain::bounds::{Bounds, DEFAULT_MAX_CHARGE, DEFAULT_MIN_CHARGE};
use battm_domain::error::BattmError;

/// On-disk shape; either key may be absent.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    max_charge: Option<i64>,
    min_charge: Option<i64>,
}

/// JSON-file implementation of [`SettingsRepository`].
#[derive(Debug, Clone)]
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<Bounds>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err)),
        };
        let file: SettingsFile = serde_json::from_str(&content)?;
        let bounds = Bounds::new(
            file.min_charge.unwrap_or(i64::from(DEFAULT_MIN_CHARGE)),
            file.max_charge.unwrap_or(i64::from(DEFAULT_MAX_CHARGE)),
        )?;
        Ok(Some(bounds))
    }

    async fn write(&self, bounds: Bounds) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(&bounds)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self) -> impl Future<Output = Result<Option<Bounds>, BattmError>> + Send {
        let repo = self.clone();
        async move { repo.read().await.map_err(BattmError::from) }
    }

    fn save(&self, bounds: Bounds) -> impl Future<Output = Result<(), BattmError>> + Send {
        let repo = self.clone();
        async move { repo.write(bounds).await.map_err(BattmError::from) }
    }
}
