use crate::domain::entity::Row;
use crate::Error;
use async_trait::async_trait;

// ステータスリポジトリトレイト
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("Table {0} not found")]
    TableNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::TableNotFound(name) => {
                Error::Schema(format!("Table {} not found", name))
            }
            RepositoryError::StorageError(msg) => Error::Storage(msg),
            RepositoryError::InternalError(msg) => Error::Internal(msg),
        }
    }
}

// ステータスリポジトリ - クエリエンジンが所有する監視状態の行への
// 抽象インターフェース。カラム側はこの向こう側を知らない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// 指定テーブルの全行を取得する
    ///
    /// 返る行ハンドルは軽量なコピーで、実体の所有はストア側に残る。
    async fn rows(&self, table_name: &str) -> Result<Vec<Row>, RepositoryError>;
}
