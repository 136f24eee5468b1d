//! Builder for creating and configuring SQLite-backed stores.

use std::path::{Path, PathBuf};

use tokio::task;

use super::SqliteStore;
use crate::{
    db::Database,
    error::{Result, TrackerError},
};

/// Builder for creating and configuring [`SqliteStore`] instances.
///
/// ```rust,no_run
/// use maintrack_core::StoreBuilder;
///
/// # async fn example() -> maintrack_core::Result<()> {
/// // Default location under $XDG_DATA_HOME
/// let store = StoreBuilder::new().build().await?;
///
/// // Or an explicit file
/// let store = StoreBuilder::new()
///     .with_database_path(Some("/tmp/plant.db"))
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/maintrack/maintrack.db` or
    /// `~/.local/share/maintrack/maintrack.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the database file if needed, applies the schema and returns
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the parent directory cannot be
    /// created, `TrackerError::Network` if the file cannot be opened as a
    /// database, and `TrackerError::Database` if schema setup fails.
    pub async fn build(self) -> Result<SqliteStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrackerError>(())
        })
        .await
        .map_err(|e| TrackerError::task("Database setup task failed", e))??;

        log::info!("Using database at {}", db_path.display());
        Ok(SqliteStore::new(db_path))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("maintrack")
            .place_data_file("maintrack.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
