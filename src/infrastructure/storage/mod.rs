pub mod memory;

pub use memory::{MemoryStatusStore, StorageError};
