use crate::domain::entity::column::Column;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{0}' already exists in table")]
    ColumnAlreadyExists(String),

    #[error("Table must have at least one column")]
    NoColumns,

    #[error("Table '{0}' already registered")]
    TableAlreadyExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),
}

impl From<TableError> for crate::Error {
    fn from(err: TableError) -> Self {
        crate::Error::Schema(err.to_string())
    }
}

/// クエリ可能なテーブルを表すエンティティ
///
/// スキーマ構築時に一度だけカラムを登録して組み立て、以後は読み取り
/// 専用で全クエリスレッドに共有される。カラムは能力インターフェースの
/// トレイトオブジェクトとして保持するので、エンジンは種別を知らない。
#[derive(Clone)]
pub struct Table {
    // テーブル名
    pub name: String,

    // 登録順のカラム列（出力順に意味がある）
    pub columns: Vec<Arc<dyn Column>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Arc<dyn Column>) -> Result<(), TableError> {
        // 同名のカラムが既に存在するかチェック
        if self.get_column(column.name()).is_some() {
            return Err(TableError::ColumnAlreadyExists(column.name().to_string()));
        }

        self.columns.push(column);
        Ok(())
    }

    /// ビルダーパターンでカラムを追加する
    pub fn with_column(mut self, column: Arc<dyn Column>) -> Result<Self, TableError> {
        self.add_column(column)?;
        Ok(self)
    }

    /// 名前でカラムを検索する
    pub fn get_column(&self, name: &str) -> Option<&Arc<dyn Column>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// テーブルが有効かチェックする
    pub fn validate(&self) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        Ok(())
    }

    /// テーブルのカラム名のリストを取得する
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.column_names())
            .finish()
    }
}

/// スキーマ全体（名前 -> テーブル）のレジストリ
///
/// 初期化パスで一度組み立てられ、以後は読み取り専用。
#[derive(Debug, Default, Clone)]
pub struct TableRegistry {
    tables: HashMap<String, Arc<Table>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// テーブルを登録する（空テーブルと名前の重複は拒否）
    pub fn register(&mut self, table: Table) -> Result<(), TableError> {
        table.validate()?;
        if self.tables.contains_key(&table.name) {
            return Err(TableError::TableAlreadyExists(table.name));
        }

        self.tables.insert(table.name.clone(), Arc::new(table));
        Ok(())
    }

    /// 名前でテーブルを取得する
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>, TableError> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| TableError::TableNotFound(name.to_string()))
    }

    /// すべてのテーブル名を取得する（名前順）
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::column::ListColumn;

    fn column(name: &str) -> Arc<dyn Column> {
        Arc::new(ListColumn::constant(name, "test column", vec![]))
    }

    #[test]
    fn add_column_rejects_duplicate_names() {
        let mut table = Table::new("hosts");
        table.add_column(column("tags")).unwrap();

        let err = table.add_column(column("tags")).unwrap_err();
        assert!(matches!(err, TableError::ColumnAlreadyExists(name) if name == "tags"));
    }

    #[test]
    fn columns_keep_registration_order() {
        let table = Table::new("hosts")
            .with_column(column("name"))
            .unwrap()
            .with_column(column("contacts"))
            .unwrap()
            .with_column(column("groups"))
            .unwrap();

        assert_eq!(table.column_names(), vec!["name", "contacts", "groups"]);
        assert!(table.get_column("contacts").is_some());
        assert!(table.get_column("missing").is_none());
    }

    #[test]
    fn validate_rejects_a_table_without_columns() {
        let table = Table::new("empty");
        assert!(matches!(table.validate(), Err(TableError::NoColumns)));
    }

    #[test]
    fn registry_registers_and_looks_up_tables() {
        let mut registry = TableRegistry::new();
        let table = Table::new("hosts").with_column(column("name")).unwrap();
        registry.register(table).unwrap();

        assert_eq!(registry.table_names(), vec!["hosts".to_string()]);
        assert_eq!(registry.get_table("hosts").unwrap().name, "hosts");

        let err = registry.get_table("services").unwrap_err();
        assert!(matches!(err, TableError::TableNotFound(name) if name == "services"));
    }

    #[test]
    fn registry_rejects_duplicate_and_empty_tables() {
        let mut registry = TableRegistry::new();
        registry
            .register(Table::new("hosts").with_column(column("name")).unwrap())
            .unwrap();

        let dup = Table::new("hosts").with_column(column("name")).unwrap();
        assert!(matches!(
            registry.register(dup),
            Err(TableError::TableAlreadyExists(_))
        ));

        assert!(matches!(
            registry.register(Table::new("bare")),
            Err(TableError::NoColumns)
        ));
    }
}
