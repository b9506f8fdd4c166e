pub mod render;
pub mod repository;
pub mod schema;
pub mod storage;
pub mod text;
