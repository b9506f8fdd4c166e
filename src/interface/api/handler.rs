use axum::{
    extract::{Extension, Json, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::entity::{Contact, TableError, TableRegistry};
use crate::domain::repository::{RepositoryError, StatusRepository};
use crate::infrastructure::render::{render, OutputFormat, RenderError};

/// API エラー
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Schema error: {0}")]
    Schema(#[from] TableError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Timezone offset {0} is out of range")]
    InvalidTimezoneOffset(i64),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Schema(e) => match e {
                TableError::TableNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                _ => (StatusCode::BAD_REQUEST, e.to_string()),
            },
            ApiError::Repository(e) => match e {
                RepositoryError::TableNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::UnsupportedFormat(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidTimezoneOffset(seconds) => (
                StatusCode::BAD_REQUEST,
                format!("Timezone offset {} is out of range", seconds),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// エラーレスポンス
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// テーブル情報のレスポンス
#[derive(Serialize)]
pub struct TableInfoResponse {
    name: String,
    columns: Vec<ColumnInfo>,
}

/// カラム情報
#[derive(Serialize)]
pub struct ColumnInfo {
    name: String,
    description: String,
}

/// データ取得のクエリパラメータ
#[derive(Deserialize)]
pub struct DataQuery {
    /// 出力フォーマット（省略時はcsv）
    format: Option<String>,

    /// 認可コンタクト名（リスト値カラムは使用しない）
    user: Option<String>,

    /// タイムゾーンオフセット秒（リスト値カラムは使用しない）
    timezone_offset: Option<i64>,
}

/// ヘルスチェックハンドラー
pub async fn health_check_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// テーブル一覧取得ハンドラー
pub async fn get_tables_handler(
    Extension(registry): Extension<Arc<TableRegistry>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(registry.table_names()))
}

/// テーブル詳細取得ハンドラー
pub async fn get_table_handler(
    Path(table_name): Path<String>,
    Extension(registry): Extension<Arc<TableRegistry>>,
) -> Result<Json<TableInfoResponse>, ApiError> {
    let table = registry.get_table(&table_name)?;

    let columns = table
        .columns
        .iter()
        .map(|col| ColumnInfo {
            name: col.name().to_string(),
            description: col.description().to_string(),
        })
        .collect();

    Ok(Json(TableInfoResponse {
        name: table.name.clone(),
        columns,
    }))
}

/// テーブルデータ取得ハンドラー
///
/// 全カラムを全行に対して評価し、指定フォーマットで描画して返す。
pub async fn get_table_data_handler(
    Path(table_name): Path<String>,
    Query(params): Query<DataQuery>,
    Extension(registry): Extension<Arc<TableRegistry>>,
    Extension(repository): Extension<Arc<dyn StatusRepository>>,
) -> Result<Response, ApiError> {
    let table = registry.get_table(&table_name)?;
    let rows = repository.rows(&table_name).await?;

    let format = match params.format.as_deref() {
        None => OutputFormat::Csv,
        Some(raw) => OutputFormat::parse(raw).map_err(ApiError::UnsupportedFormat)?,
    };
    let auth_user = params.user.map(Contact::new);
    // Duration::seconds は範囲外でパニックするため、チェック付きで構築する
    let offset_seconds = params.timezone_offset.unwrap_or(0);
    let timezone_offset = Duration::try_seconds(offset_seconds)
        .ok_or(ApiError::InvalidTimezoneOffset(offset_seconds))?;

    let body = render(&table, &rows, auth_user.as_ref(), timezone_offset, format)?;

    let content_type = match format {
        OutputFormat::Csv => "text/plain; charset=utf-8",
        OutputFormat::Json => "application/json",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], Bytes::from(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{HostStatus, Row};
    use crate::domain::repository::status_repository::MockStatusRepository;
    use crate::infrastructure::schema::hosts_table;
    use crate::infrastructure::storage::MemoryStatusStore;

    fn registry_with_hosts(store: &MemoryStatusStore) -> Arc<TableRegistry> {
        let mut registry = TableRegistry::new();
        registry.register(hosts_table(store).unwrap()).unwrap();
        Arc::new(registry)
    }

    fn mocked_repository(rows: Vec<Row>) -> Arc<dyn StatusRepository> {
        let mut repository = MockStatusRepository::new();
        repository
            .expect_rows()
            .returning(move |_| Ok(rows.clone()));
        Arc::new(repository)
    }

    #[tokio::test]
    async fn data_handler_renders_the_mocked_rows() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);
        let repository = mocked_repository(vec![Row::from_value(
            HostStatus::builder().name("web01").tags("linux,prod").build(),
        )]);

        let response = get_table_data_handler(
            Path("hosts".to_string()),
            Query(DataQuery {
                format: Some("csv".to_string()),
                user: None,
                timezone_offset: None,
            }),
            Extension(registry),
            Extension(repository),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn data_handler_defaults_to_csv() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);
        let repository = mocked_repository(Vec::new());

        let response = get_table_data_handler(
            Path("hosts".to_string()),
            Query(DataQuery {
                format: None,
                user: None,
                timezone_offset: None,
            }),
            Extension(registry),
            Extension(repository),
        )
        .await
        .unwrap();

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn unknown_table_maps_to_not_found() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);
        let repository = mocked_repository(Vec::new());

        let err = get_table_data_handler(
            Path("services".to_string()),
            Query(DataQuery {
                format: None,
                user: None,
                timezone_offset: None,
            }),
            Extension(registry),
            Extension(repository),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_format_maps_to_bad_request() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);
        let repository = mocked_repository(Vec::new());

        let err = get_table_data_handler(
            Path("hosts".to_string()),
            Query(DataQuery {
                format: Some("xml".to_string()),
                user: None,
                timezone_offset: None,
            }),
            Extension(registry),
            Extension(repository),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn extreme_timezone_offset_maps_to_bad_request() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);
        let repository = mocked_repository(Vec::new());

        for offset in [i64::MAX, i64::MIN] {
            let err = get_table_data_handler(
                Path("hosts".to_string()),
                Query(DataQuery {
                    format: None,
                    user: None,
                    timezone_offset: Some(offset),
                }),
                Extension(registry.clone()),
                Extension(repository.clone()),
            )
            .await
            .unwrap_err();

            assert!(matches!(err, ApiError::InvalidTimezoneOffset(_)));
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }

        // 通常範囲のオフセットはこれまで通り成功する
        let response = get_table_data_handler(
            Path("hosts".to_string()),
            Query(DataQuery {
                format: None,
                user: None,
                timezone_offset: Some(7_200),
            }),
            Extension(registry),
            Extension(repository),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn repository_failure_maps_to_internal_error() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);

        let mut repository = MockStatusRepository::new();
        repository
            .expect_rows()
            .returning(|_| Err(RepositoryError::InternalError("store offline".to_string())));

        let err = get_table_data_handler(
            Path("hosts".to_string()),
            Query(DataQuery {
                format: None,
                user: None,
                timezone_offset: None,
            }),
            Extension(registry),
            Extension(Arc::new(repository) as Arc<dyn StatusRepository>),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn table_handler_describes_the_columns() {
        let store = MemoryStatusStore::new();
        let registry = registry_with_hosts(&store);

        let Json(info) = get_table_handler(Path("hosts".to_string()), Extension(registry))
            .await
            .unwrap();

        assert_eq!(info.name, "hosts");
        assert!(info.columns.iter().any(|c| c.name == "tags"));
        assert!(info
            .columns
            .iter()
            .all(|c| !c.description.is_empty()));
    }
}
