use chrono::Duration;
use derive_more::Display;
use itertools::Itertools;
use serde_json::json;
use strum::EnumString;
use thiserror::Error;

use crate::domain::entity::{ColumnError, Contact, ListValue, Row, Table};
use crate::infrastructure::text;

/// フィールド間のセパレータ
pub const FIELD_SEPARATOR: &str = ";";

/// リスト要素間のセパレータ
pub const LIST_SEPARATOR: &str = ",";

/// 描画エラー
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Column evaluation failed: {0}")]
    Column(#[from] ColumnError),

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<RenderError> for crate::Error {
    fn from(err: RenderError) -> Self {
        crate::Error::Render(err.to_string())
    }
}

/// サポートされる出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum OutputFormat {
    #[strum(serialize = "csv")]
    Csv,

    #[strum(serialize = "json")]
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        s.to_lowercase()
            .parse::<OutputFormat>()
            .map_err(|_| format!("Unsupported output format: {}", s))
    }
}

/// テーブルの全行を行指向のテキストへ描画する
///
/// 先頭はカラム名のヘッダ行。以降は1行につき1ホストで、各カラムの
/// リスト値を連結したフィールドが並ぶ。カラムの評価失敗はクエリ全体の
/// 失敗として伝播し、部分的な出力は返さない。
pub fn render(
    table: &Table,
    rows: &[Row],
    auth_user: Option<&Contact>,
    timezone_offset: Duration,
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Csv => render_csv(table, rows, auth_user, timezone_offset),
        OutputFormat::Json => render_json(table, rows, auth_user, timezone_offset),
    }
}

fn render_csv(
    table: &Table,
    rows: &[Row],
    auth_user: Option<&Contact>,
    timezone_offset: Duration,
) -> Result<String, RenderError> {
    let mut out = String::new();
    out.push_str(&table.column_names().iter().join(FIELD_SEPARATOR));
    out.push('\n');

    for row in rows {
        let mut fields = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let value = column.get_value(row, auth_user, timezone_offset)?;
            // リストを連結してから改行をエスケープし、物理1行に収める
            fields.push(text::escape_newlines(&text::join(&value, LIST_SEPARATOR)));
        }
        out.push_str(&fields.iter().join(FIELD_SEPARATOR));
        out.push('\n');
    }

    Ok(out)
}

fn render_json(
    table: &Table,
    rows: &[Row],
    auth_user: Option<&Contact>,
    timezone_offset: Duration,
) -> Result<String, RenderError> {
    // 先頭にヘッダ行を置いた、配列の配列
    let mut lines: Vec<serde_json::Value> = Vec::with_capacity(rows.len() + 1);
    lines.push(json!(table.column_names()));

    for row in rows {
        let mut fields: Vec<ListValue> = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            fields.push(column.get_value(row, auth_user, timezone_offset)?);
        }
        lines.push(json!(fields));
    }

    Ok(serde_json::to_string(&lines)?)
}
