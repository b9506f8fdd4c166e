use statusdb::domain::entity::HostStatus;
use statusdb::infrastructure::storage::MemoryStatusStore;
use statusdb::interface::api::{start_server, ServerConfig};
use statusdb::VERSION;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    info!("StatusDB version: {}", VERSION);

    // デモ用の監視状態を投入する
    let store = Arc::new(MemoryStatusStore::new());
    store.set_default_contact_groups(vec!["admins".to_string(), "oncall".to_string()]);

    store.add_host(
        HostStatus::builder()
            .name("web01")
            .address("10.0.0.1")
            .contacts(vec!["alice".to_string(), "bob".to_string()])
            .groups(vec!["web".to_string(), "production".to_string()])
            .tags("linux,nginx,frontend")
            .build(),
    )?;
    store.add_host(
        HostStatus::builder()
            .name("db01")
            .address("10.0.0.2")
            .contacts(vec!["carol".to_string()])
            .groups(vec!["database".to_string(), "production".to_string()])
            .tags("linux,postgres")
            .build(),
    )?;
    store.add_host(
        HostStatus::builder()
            .name("backup01")
            .address("10.0.0.3")
            .tags("")
            .build(),
    )?;

    info!("{}台のホストを投入しました", store.host_count());

    start_server(ServerConfig::default(), store).await
}
