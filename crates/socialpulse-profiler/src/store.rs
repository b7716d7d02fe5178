//! Snapshot persistence seam.

use std::sync::Mutex;

use async_trait::async_trait;
use socialpulse_core::ProfileSnapshot;

use crate::error::StoreError;

/// A persisted snapshot with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub id: i64,
    pub snapshot: ProfileSnapshot,
}

/// Append-only store of profile snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persists one snapshot with its posts and returns the new id.
    async fn insert_snapshot(&self, snapshot: &ProfileSnapshot) -> Result<i64, StoreError>;

    /// Lists snapshots for `handle`, newest first, at most `limit`.
    async fn list_snapshots(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Vec<StoredSnapshot>, StoreError>;

    /// Verifies the backend is reachable.
    async fn health(&self) -> Result<(), StoreError>;
}

/// In-process store used by tests and by the CLI when no database is set.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    rows: Mutex<Vec<StoredSnapshot>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().map_or(0, |rows| rows.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::new("memory store lock poisoned")
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn insert_snapshot(&self, snapshot: &ProfileSnapshot) -> Result<i64, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        let id = i64::try_from(rows.len()).map_err(StoreError::new)? + 1;
        rows.push(StoredSnapshot {
            id,
            snapshot: snapshot.clone(),
        });
        Ok(id)
    }

    async fn list_snapshots(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Vec<StoredSnapshot>, StoreError> {
        let rows = self.rows.lock().map_err(|_| poisoned())?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.snapshot.handle == handle)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn health(&self) -> Result<(), StoreError> {
        self.rows.lock().map(|_| ()).map_err(|_| poisoned())
    }
}
