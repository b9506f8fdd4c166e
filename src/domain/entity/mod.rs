pub mod row;
pub mod contact;
pub mod column;
pub mod host;
pub mod table;
// src/domain/entity/mod.rs

pub use row::{Row, RowError};
pub use contact::Contact;
pub use column::{Column, ColumnError, ListColumn, ListValue};
pub use host::HostStatus;
pub use table::{Table, TableError, TableRegistry};
