use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// 行アクセスエラー
#[derive(Error, Debug, PartialEq)]
pub enum RowError {
    #[error("Row payload is {actual}, accessor expected {expected}")]
    PayloadType {
        expected: &'static str,
        actual: &'static str,
    },
}

/// クエリエンジンが評価する1レコードへの不透明なハンドル
///
/// 実体（監視対象オブジェクト）はクエリエンジン側が所有し、
/// カラムからは読み取り専用でアクセスされる。
/// Cloneは参照カウントの加算のみなのでコピーは軽量。
#[derive(Clone)]
pub struct Row {
    payload: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Row {
    /// 監視対象オブジェクトを包んで行ハンドルを作成する
    pub fn new<T: Any + Send + Sync>(payload: Arc<T>) -> Self {
        Self {
            payload,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 値から直接行ハンドルを作成する
    pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
        Self::new(Arc::new(value))
    }

    /// 期待する型で実体を参照する
    ///
    /// 型が一致しない場合はアクセサの評価失敗として扱われる。
    pub fn payload<T: Any + Send + Sync>(&self) -> Result<&T, RowError> {
        self.payload
            .downcast_ref::<T>()
            .ok_or(RowError::PayloadType {
                expected: std::any::type_name::<T>(),
                actual: self.type_name,
            })
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("type_name", &self.type_name)
            .finish()
    }
}
