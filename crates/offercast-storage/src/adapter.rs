// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use offercast_config::model::StorageConfig;
use offercast_core::{
    AdapterType, ChannelId, HealthStatus, NetworkAdapter, OfferRequest, OfferResponse,
    OffercastError, RecordStore, RequestId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`RecordStore::initialize`].
pub struct SqliteRecordStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore with the given configuration.
    ///
    /// The database connection is not opened until [`RecordStore::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, OffercastError> {
        self.db.get().ok_or_else(|| OffercastError::Storage {
            source: "record store not initialized -- call initialize() first".into(),
        })
    }

    /// Request counts by status: `(pending, completed)`. Used by the status
    /// command; not part of the [`RecordStore`] contract.
    pub async fn record_counts(&self) -> Result<(i64, i64), OffercastError> {
        queries::requests::count_requests(self.db()?).await
    }
}

#[async_trait]
impl NetworkAdapter for SqliteRecordStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, OffercastError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OffercastError> {
        // Shutdown checkpoints iff the DB was initialized.
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn initialize(&self) -> Result<(), OffercastError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| OffercastError::Storage {
            source: "record store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite record store initialized");
        Ok(())
    }

    async fn create_request(&self, request: &OfferRequest) -> Result<(), OffercastError> {
        queries::requests::create_request(self.db()?, request).await
    }

    async fn request(&self, id: &RequestId) -> Result<Option<OfferRequest>, OffercastError> {
        queries::requests::get_request(self.db()?, id).await
    }

    async fn requests_for_channel(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError> {
        queries::requests::list_requests_for_channel(self.db()?, channel).await
    }

    async fn pending_requests(
        &self,
        channel: &ChannelId,
    ) -> Result<Vec<OfferRequest>, OffercastError> {
        queries::requests::list_pending_requests(self.db()?, channel).await
    }

    async fn create_response(&self, response: &OfferResponse) -> Result<bool, OffercastError> {
        queries::responses::create_response(self.db()?, response).await
    }

    async fn response_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<OfferResponse>, OffercastError> {
        queries::responses::get_response_for_request(self.db()?, request_id).await
    }

    async fn mark_completed(&self, request_id: &RequestId) -> Result<bool, OffercastError> {
        queries::requests::mark_request_completed(self.db()?, request_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offercast_core::{ProviderId, RequestStatus, SubscriberId};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn sample_request() -> OfferRequest {
        OfferRequest::new(
            SubscriberId("sub-a".to_string()),
            ProviderId("provider-1".to_string()),
            "translation".to_string(),
            "offer text".to_string(),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn record_store_implements_network_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        let result = store.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        let result = store.health_check().await;
        assert!(result.is_err(), "health_check should fail before initialize");
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        let status = store.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn full_record_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();

        let request = sample_request();
        store.create_request(&request).await.unwrap();

        let retrieved = store.request(&request.id).await.unwrap().unwrap();
        assert_eq!(retrieved.id, request.id);
        assert_eq!(retrieved.status, RequestStatus::Pending);

        let pending = store.pending_requests(&request.channel).await.unwrap();
        assert_eq!(pending.len(), 1);

        let response = OfferResponse::for_request(&request, "accepted".to_string());
        assert!(store.create_response(&response).await.unwrap());
        assert!(store.mark_completed(&request.id).await.unwrap());

        let pending = store.pending_requests(&request.channel).await.unwrap();
        assert!(pending.is_empty());

        let stored = store
            .response_for_request(&request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.text, "accepted");

        let all = store.requests_for_channel(&request.channel).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, RequestStatus::Completed);

        store.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_before_initialize_is_a_no_op() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("never_opened.db");
        let store = SqliteRecordStore::new(make_config(db_path.to_str().unwrap()));

        store.shutdown().await.unwrap();
        assert!(!db_path.exists());
    }
}
