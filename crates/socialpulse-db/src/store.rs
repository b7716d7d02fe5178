//! Postgres-backed [`SnapshotStore`].

use async_trait::async_trait;
use socialpulse_core::ProfileSnapshot;
use socialpulse_profiler::{SnapshotStore, StoreError, StoredSnapshot};
use sqlx::PgPool;

use crate::{health_check, insert_profile_snapshot, list_profile_snapshots};

#[derive(Debug, Clone)]
pub struct PgSnapshotStore {
    pool: PgPool,
}

impl PgSnapshotStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotStore for PgSnapshotStore {
    async fn insert_snapshot(&self, snapshot: &ProfileSnapshot) -> Result<i64, StoreError> {
        insert_profile_snapshot(&self.pool, snapshot)
            .await
            .map_err(StoreError::new)
    }

    async fn list_snapshots(
        &self,
        handle: &str,
        limit: usize,
    ) -> Result<Vec<StoredSnapshot>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = list_profile_snapshots(&self.pool, handle, limit)
            .await
            .map_err(StoreError::new)?;
        Ok(rows
            .into_iter()
            .map(|row| StoredSnapshot {
                id: row.id,
                snapshot: row.snapshot,
            })
            .collect())
    }

    async fn health(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await.map_err(StoreError::new)
    }
}
