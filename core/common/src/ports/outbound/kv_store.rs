//! 永続キー・バリューストア Outbound ポート
//!
//! 値はすべて JSON 文字列。キーは固定の既知名（pillReminderData など）を使う。
//! 書き込みはその都度行い、バッチやトランザクションは持たない。

use crate::error::Error;

/// 永続 KV ストアの抽象（Outbound ポート）
///
/// 実装は `common::adapter::FileKeyValueStore`（キーごとのファイル）や
/// `common::adapter::MemoryKeyValueStore`（テスト用）。
pub trait KeyValueStore: Send + Sync {
    /// キーの値を返す。未設定なら `Ok(None)`。
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// キーに値を書き込む（上書き）
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// キーを削除する。存在しなければ何もしない。
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// キー名として使える文字か（ファイル名にそのまま使うため英数字と `_` に限る）
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
