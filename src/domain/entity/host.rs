use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// 監視対象ホストの状態を表すエンティティ
///
/// 行ハンドルが指す実体。所有と更新はクエリエンジン側（ストア）の責務で、
/// カラムからは読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct HostStatus {
    /// ホスト名
    #[builder(setter(into))]
    pub name: String,

    /// ネットワークアドレス
    #[builder(default, setter(into))]
    pub address: String,

    /// 通知先コンタクトのリスト
    #[builder(default)]
    pub contacts: Vec<String>,

    /// 所属するホストグループのリスト
    #[builder(default)]
    pub groups: Vec<String>,

    // カンマ区切りの生タグ文字列。リスト化はカラムのアクセサ側で行う
    #[builder(default, setter(into))]
    pub tags: String,
}

impl HostStatus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            contacts: Vec::new(),
            groups: Vec::new(),
            tags: String::new(),
        }
    }
}
