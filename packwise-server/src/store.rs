//! Persistence of the pack-size catalog.
//!
//! The catalog is a single SQLite table of distinct positive sizes. Every
//! operation runs on a blocking thread; callers get explicit outcome
//! variants (`AlreadyExists`, `NotFound`) instead of generic failures so the
//! API layer can report distinguishable categories. No retry policy lives
//! here: backend failures are surfaced upward unchanged.

use anyhow::anyhow;
use async_trait::async_trait;
use packwise::PackSize;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pack size {0} already exists")]
    AlreadyExists(PackSize),
    #[error("pack size {0} not found")]
    NotFound(PackSize),
    #[error("pack size must be a positive integer")]
    InvalidSize,
    #[error("catalog store unavailable: {0}")]
    Backend(#[from] anyhow::Error),
}

/// The catalog as the orchestration layer sees it. Reads and writes are not
/// linearizable with concurrent calculations; a calculation may observe a
/// slightly stale snapshot (accepted relaxation, last write wins).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Current catalog. No ordering guarantee; the selector does not assume one.
    async fn list(&self) -> Result<Vec<PackSize>, StoreError>;
    async fn add(&self, size: PackSize) -> Result<(), StoreError>;
    async fn remove(&self, size: PackSize) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SqliteCatalogStore {
    db_path: PathBuf,
}

impl SqliteCatalogStore {
    /// Opens (creating if needed) the catalog database at `db_path`.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = db_path.as_ref().to_path_buf();
        let path_for_init = path.clone();

        run_blocking(move || {
            let conn = Connection::open(&path_for_init)?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS pack_sizes (
                    size INTEGER PRIMARY KEY CHECK(size > 0)
                )",
                [],
            )?;
            Ok(())
        })
        .await?;

        Ok(Self { db_path: path })
    }

    /// Inserts `sizes` that are not yet present. Used to seed an initial
    /// catalog at startup; existing entries are left untouched.
    pub async fn seed(&self, sizes: &[PackSize]) -> Result<(), StoreError> {
        for &size in sizes {
            match self.add(size).await {
                Ok(()) | Err(StoreError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list(&self) -> Result<Vec<PackSize>, StoreError> {
        let path = self.db_path.clone();

        run_blocking(move || {
            let conn = Connection::open(&path)?;
            let mut stmt = conn.prepare("SELECT size FROM pack_sizes ORDER BY size DESC")?;
            let sizes = stmt
                .query_map([], |row| row.get::<_, i64>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(sizes.into_iter().map(|s| s as PackSize).collect())
        })
        .await
    }

    async fn add(&self, size: PackSize) -> Result<(), StoreError> {
        let stored = storable_size(size)?;
        let path = self.db_path.clone();

        run_blocking(move || {
            let conn = Connection::open(&path)?;
            match conn.execute("INSERT INTO pack_sizes (size) VALUES (?1)", [stored]) {
                Ok(_) => Ok(()),
                Err(e) if is_constraint_violation(&e) => {
                    Err(StoreError::AlreadyExists(stored as PackSize))
                }
                Err(e) => Err(StoreError::Backend(e.into())),
            }
        })
        .await
    }

    async fn remove(&self, size: PackSize) -> Result<(), StoreError> {
        let stored = storable_size(size)?;
        let path = self.db_path.clone();

        run_blocking(move || {
            let conn = Connection::open(&path)?;
            let affected = conn.execute("DELETE FROM pack_sizes WHERE size = ?1", [stored])?;
            match affected {
                0 => Err(StoreError::NotFound(stored as PackSize)),
                _ => Ok(()),
            }
        })
        .await
    }
}

/// SQLite stores INTEGER as i64; sizes outside that range are rejected along
/// with zero.
fn storable_size(size: PackSize) -> Result<i64, StoreError> {
    if size == 0 {
        return Err(StoreError::InvalidSize);
    }
    i64::try_from(size).map_err(|_| StoreError::InvalidSize)
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

async fn run_blocking<T>(
    f: impl FnOnce() -> Result<T, StoreError> + Send + 'static,
) -> Result<T, StoreError>
where
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Backend(anyhow!("catalog store task panicked: {e}")))?
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Backend(e.into())
    }
}
