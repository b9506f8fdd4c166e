use axum::{routing::get, Extension, Router, Server};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::entity::TableRegistry;
use crate::domain::repository::StatusRepository;
use crate::infrastructure::repository::MemoryStatusRepository;
use crate::infrastructure::schema::hosts_table;
use crate::infrastructure::storage::MemoryStatusStore;
use crate::interface::api::handler::{
    get_table_data_handler, get_table_handler, get_tables_handler, health_check_handler,
};

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 6557, // 監視ステータス照会の慣習ポート
        }
    }
}

pub async fn start_server(
    config: ServerConfig,
    store: Arc<MemoryStatusStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    // リポジトリの初期化
    let repository: Arc<dyn StatusRepository> =
        Arc::new(MemoryStatusRepository::new(store.clone()));

    // スキーマの構築（初期化パスで一度だけ。以後は読み取り専用で共有）
    let mut registry = TableRegistry::new();
    registry.register(hosts_table(&store)?)?;
    let registry = Arc::new(registry);

    // ルーターの設定
    let app = Router::new()
        .route("/health", get(health_check_handler))
        .route("/api/tables", get(get_tables_handler))
        .route("/api/tables/:table_name", get(get_table_handler))
        .route("/api/tables/:table_name/data", get(get_table_data_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .layer(Extension(repository)) // リポジトリの拡張
        .layer(Extension(registry)); // テーブルレジストリの拡張

    // サーバーのアドレス設定
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("サーバーを{}で起動中...", addr);

    // サーバーの起動
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}
