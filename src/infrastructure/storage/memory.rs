use std::sync::{Arc, RwLock};

use crate::domain::entity::{HostStatus, ListValue, Row};
use thiserror::Error;
use tracing::debug;

/// ストレージエラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Host {0} already exists")]
    HostAlreadyExists(String),

    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// 監視状態のインメモリストア
///
/// ホスト実体の所有者。行はここで `Arc` に包んで貸し出すため、
/// 評価中の行がストア側の操作で無効になることはない。
/// `default_contact_groups` は参照カラムが共有するライブリストで、
/// 更新は次の評価から観測される。
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    hosts: RwLock<Vec<Arc<HostStatus>>>,
    default_contact_groups: Arc<RwLock<ListValue>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self {
            hosts: RwLock::new(Vec::new()),
            default_contact_groups: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// ホストを追加する
    pub fn add_host(&self, host: HostStatus) -> Result<(), StorageError> {
        let mut hosts = self.hosts.write().unwrap();

        if hosts.iter().any(|existing| existing.name == host.name) {
            return Err(StorageError::HostAlreadyExists(host.name));
        }

        debug!(host = %host.name, "adding host");
        hosts.push(Arc::new(host));
        Ok(())
    }

    /// すべてのホストを行ハンドルとして取得する
    pub fn host_rows(&self) -> Vec<Row> {
        let hosts = self.hosts.read().unwrap();
        hosts.iter().map(|host| Row::new(host.clone())).collect()
    }

    /// ホスト数を取得する
    pub fn host_count(&self) -> usize {
        let hosts = self.hosts.read().unwrap();
        hosts.len()
    }

    /// 既定コンタクトグループへの共有ハンドルを取得する
    ///
    /// 参照カラムの構築に渡す。リストの実体はストアと共有されるため、
    /// ストア側の更新はカラムの次の読み出しに反映される。
    pub fn default_contact_groups(&self) -> Arc<RwLock<ListValue>> {
        self.default_contact_groups.clone()
    }

    /// 既定コンタクトグループを置き換える
    pub fn set_default_contact_groups(&self, groups: ListValue) {
        let mut current = self.default_contact_groups.write().unwrap();
        debug!(groups = ?groups, "replacing default contact groups");
        *current = groups;
    }
}
