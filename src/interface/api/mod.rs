pub mod handler;
pub mod server;

pub use server::{start_server, ServerConfig};
