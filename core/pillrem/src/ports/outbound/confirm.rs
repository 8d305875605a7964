//! 確認 Outbound ポート
//!
//! 削除の前に利用者へ確認する。応答が得られるまでブロックする。

/// 確認プロンプトの抽象（Outbound ポート）
///
/// 実装は `StdinConfirm`（[y/N] を読む）や `AutoConfirm`（--yes・テスト用）。
pub trait Confirm: Send + Sync {
    /// 承認されたら true
    fn confirm(&self, message: &str) -> bool;
}
