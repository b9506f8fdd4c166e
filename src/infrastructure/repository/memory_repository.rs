use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entity::Row;
use crate::domain::repository::{RepositoryError, StatusRepository};
use crate::infrastructure::schema::HOSTS_TABLE;
use crate::infrastructure::storage::{MemoryStatusStore, StorageError};

/// インメモリリポジトリの実装
pub struct MemoryStatusRepository {
    store: Arc<MemoryStatusStore>,
}

impl MemoryStatusRepository {
    pub fn new(store: Arc<MemoryStatusStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatusRepository for MemoryStatusRepository {
    async fn rows(&self, table_name: &str) -> Result<Vec<Row>, RepositoryError> {
        match table_name {
            HOSTS_TABLE => Ok(self.store.host_rows()),
            other => Err(RepositoryError::TableNotFound(other.to_string())),
        }
    }
}

impl From<StorageError> for RepositoryError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Internal(msg) => RepositoryError::InternalError(msg),
            other => RepositoryError::StorageError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::HostStatus;

    #[tokio::test]
    async fn rows_returns_every_stored_host() {
        let store = Arc::new(MemoryStatusStore::new());
        store.add_host(HostStatus::new("web01")).unwrap();
        store.add_host(HostStatus::new("db01")).unwrap();

        let repository = MemoryStatusRepository::new(store);
        let rows = repository.rows(HOSTS_TABLE).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn rows_rejects_unknown_table() {
        let store = Arc::new(MemoryStatusStore::new());
        let repository = MemoryStatusRepository::new(store);

        let result = repository.rows("services").await;
        assert!(matches!(
            result,
            Err(RepositoryError::TableNotFound(name)) if name == "services"
        ));
    }

    #[test]
    fn storage_errors_map_into_repository_errors() {
        let error = RepositoryError::from(StorageError::HostAlreadyExists("web01".to_string()));
        assert!(matches!(error, RepositoryError::StorageError(_)));

        let error = RepositoryError::from(StorageError::Internal("lock poisoned".to_string()));
        assert!(matches!(error, RepositoryError::InternalError(_)));
    }
}
