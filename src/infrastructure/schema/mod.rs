pub mod hosts;

pub use hosts::{hosts_table, HOSTS_TABLE};
