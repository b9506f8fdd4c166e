use itertools::Itertools;

/// strip系が既定で取り除く空白文字の集合
pub const WHITESPACE: &str = " \t\n\u{0B}\u{0C}\r";

/// 文字列をデリミタで分割してリスト値にする
///
/// 空文字列は空リストになる。末尾のデリミタ1個分の空フィールドは
/// 生成しない（`"a,"` は `["a"]`）。先頭と中間の空フィールドは保持する。
pub fn split(s: &str, delimiter: char) -> Vec<String> {
    let mut fields: Vec<String> = s.split(delimiter).map(str::to_string).collect();
    if fields.last().map_or(false, |field| field.is_empty()) {
        fields.pop();
    }
    fields
}

/// リスト値を1つの文字列へ連結する
pub fn join(values: &[String], separator: &str) -> String {
    values.iter().join(separator)
}

/// 先頭から指定した文字集合を取り除く
pub fn lstrip<'a>(s: &'a str, chars: &str) -> &'a str {
    s.trim_start_matches(|c| chars.contains(c))
}

/// 末尾から指定した文字集合を取り除く
pub fn rstrip<'a>(s: &'a str, chars: &str) -> &'a str {
    s.trim_end_matches(|c| chars.contains(c))
}

/// 両端から空白を取り除く
pub fn strip(s: &str) -> &str {
    rstrip(lstrip(s, WHITESPACE), WHITESPACE)
}

/// 改行を2文字のエスケープ列 `\n` に置き換える
///
/// 行指向の出力で1フィールドが物理1行に収まることを保証する。
pub fn escape_newlines(s: &str) -> String {
    s.replace('\n', "\\n")
}

/// エスケープ列 `\n` を改行へ戻す
pub fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}
