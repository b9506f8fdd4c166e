use std::sync::Arc;

use crate::domain::entity::{HostStatus, ListColumn, Row, Table, TableError};
use crate::infrastructure::storage::MemoryStatusStore;
use crate::infrastructure::text;

/// ホストテーブルの名前
pub const HOSTS_TABLE: &str = "hosts";

/// hostsテーブルのスキーマを構築する
///
/// サーバー初期化パスで一度だけ呼ばれ、以後テーブルは読み取り専用で
/// 共有される。参照カラムはストアのライブリストへの共有ハンドルを
/// 束縛するため、構築後のストア更新も次のクエリで観測される。
pub fn hosts_table(store: &MemoryStatusStore) -> Result<Table, TableError> {
    Table::new(HOSTS_TABLE)
        .with_column(Arc::new(ListColumn::new(
            "name",
            "The name of the host",
            |row: &Row| Ok(vec![row.payload::<HostStatus>()?.name.clone()]),
        )))?
        .with_column(Arc::new(ListColumn::new(
            "contacts",
            "A list of all contacts of this host",
            |row: &Row| Ok(row.payload::<HostStatus>()?.contacts.clone()),
        )))?
        .with_column(Arc::new(ListColumn::new(
            "groups",
            "A list of all host groups this host is in",
            |row: &Row| Ok(row.payload::<HostStatus>()?.groups.clone()),
        )))?
        .with_column(Arc::new(ListColumn::new(
            "tags",
            "A list of the tags of the host",
            |row: &Row| {
                let host = row.payload::<HostStatus>()?;
                Ok(text::split(text::strip(&host.tags), ',')
                    .iter()
                    .map(|tag| text::strip(tag).to_string())
                    .collect())
            },
        )))?
        .with_column(Arc::new(ListColumn::constant(
            "state_names",
            "The ordered list of state names a host can take",
            vec![
                "up".to_string(),
                "down".to_string(),
                "unreachable".to_string(),
            ],
        )))?
        .with_column(Arc::new(ListColumn::reference(
            "default_contact_groups",
            "The contact groups applied when a host has none of its own",
            store.default_contact_groups(),
        )))
}
