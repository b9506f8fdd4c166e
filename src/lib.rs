pub mod domain;
pub mod infrastructure;
pub mod interface;

// StatusDB version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Query engine result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
