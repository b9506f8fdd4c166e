use crate::domain::entity::contact::Contact;
use crate::domain::entity::row::{Row, RowError};
use chrono::Duration;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// カラム評価エラー
///
/// 構築は常に成功する。失敗するのは行ごとの評価だけであり、
/// コアは回復も既定値の代入も行わず、そのまま呼び出し側へ伝播させる。
#[derive(Error, Debug)]
pub enum ColumnError {
    /// アクセサが行の評価に失敗した
    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    /// 参照先の共有リストが読み取れない（書き込み側のパニック等）
    #[error("Referenced value is unreadable: {0}")]
    SourceUnreadable(String),

    /// 行の実体型がアクセサの期待と一致しない
    #[error(transparent)]
    Row(#[from] RowError),
}

impl From<ColumnError> for crate::Error {
    fn from(err: ColumnError) -> Self {
        crate::Error::Evaluation(err.to_string())
    }
}

/// リスト値カラムの値型
///
/// 1行1フィールド分の内容を表す順序付きテキスト列。挿入順に意味がある。
pub type ListValue = Vec<String>;

/// カラムに束縛されるアクセサ（行 -> リスト値の純粋な計算）
type Accessor = Box<dyn Fn(&Row) -> Result<ListValue, ColumnError> + Send + Sync>;

/// カラム能力のインターフェース
///
/// `get_value` の3引数はカラム種別間で統一されている。権限情報や
/// タイムゾーンを必要とする種別もあるため全種別が同じ形で受け取り、
/// 不要な種別は単に無視する。テーブルはこのトレイトオブジェクトを
/// 登録して保持し、クエリエンジンは種別を特別扱いせずに呼び出す。
pub trait Column: Send + Sync {
    /// カラム名
    fn name(&self) -> &str;

    /// カラムの説明
    fn description(&self) -> &str;

    /// 1行分の値を生成する
    fn get_value(
        &self,
        row: &Row,
        auth_user: Option<&Contact>,
        timezone_offset: Duration,
    ) -> Result<ListValue, ColumnError>;
}

/// 任意の行->リスト値計算を1つのカラム実装へ適合させる汎用コア
///
/// 計算ごとに具象型を増やす代わりに、構築時にアクセサ（クロージャ）を
/// 束縛してボックス化する。メタデータ（名前・説明）と束縛は構築後に
/// 変化せず、カラム自身は共有可変状態を持たないため、複数クエリ
/// スレッドから同時に `get_value` を呼び出してよい。
pub struct ListColumn {
    name: String,
    description: String,
    accessor: Accessor,
}

impl ListColumn {
    /// アクセサを束縛して汎用カラムを作成する
    ///
    /// アクセサの検証は行わない。行と捕捉した状態の読み取り専用関数で
    /// あることを信頼し、結果（空列を含む）は加工せずそのまま返す。
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        accessor: impl Fn(&Row) -> Result<ListValue, ColumnError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            accessor: Box::new(accessor),
        }
    }

    /// 構築時に固定した値を返すカラムを作成する（凍結スナップショット）
    ///
    /// 値は構築時に取り込まれ、以後は元の値がどう変更されても結果は
    /// 変わらない。行・認可ユーザー・タイムゾーンのいずれにも依存しない。
    pub fn constant(
        name: impl Into<String>,
        description: impl Into<String>,
        value: ListValue,
    ) -> Self {
        Self::new(name, description, move |_row| Ok(value.clone()))
    }

    /// 外部所有の共有リストを毎回読み直すカラムを作成する（リードスルー）
    ///
    /// 保持するのは `Arc<RwLock<_>>` の共有ハンドルだけで、値のコピーは
    /// 持たない。呼び出しのたびに現在の内容を読むため、構築後の変更は
    /// 次の `get_value` で観測される。キャッシュもスナップショットもない。
    ///
    /// 参照先の生存は `Arc` が保証するので、呼び出し側に寿命契約を課す
    /// 必要はない。並行する書き込みとの同期は所有側と共有する `RwLock`
    /// が担う。書き込みスレッドのパニックでロックが毒化されていた場合、
    /// 読み出しは `SourceUnreadable` の評価失敗として伝播する。
    pub fn reference(
        name: impl Into<String>,
        description: impl Into<String>,
        source: Arc<RwLock<ListValue>>,
    ) -> Self {
        Self::new(name, description, move |_row| {
            let current = source
                .read()
                .map_err(|e| ColumnError::SourceUnreadable(e.to_string()))?;
            Ok(current.clone())
        })
    }
}

impl Column for ListColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn get_value(
        &self,
        row: &Row,
        _auth_user: Option<&Contact>,
        _timezone_offset: Duration,
    ) -> Result<ListValue, ColumnError> {
        // auth_user と timezone_offset はインターフェース統一のための引数。
        // リスト値カラムは権限による絞り込みもタイムゾーン描画も行わない。
        (self.accessor)(row)
    }
}

impl fmt::Debug for ListColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListColumn")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
