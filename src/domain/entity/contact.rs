use serde::{Deserialize, Serialize};

/// 問い合わせ元の認可ユーザーを表すエンティティ
///
/// フィールドの可視性制御（認可モデル）はクエリエンジンの外側の責務。
/// このコアではカラムインターフェースの統一のために受け渡されるだけで、
/// リスト値カラムはこれを参照しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// コンタクト名
    pub name: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
