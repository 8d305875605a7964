//! 通知 Outbound ポート
//!
//! 操作の結果（成功・失敗・確認）を利用者に一時的に知らせる。呼び出しは投げっぱなし。

/// 通知の重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// 通知先の抽象（Outbound ポート）
///
/// 実装は `ConsoleNotifier`（stderr）やテスト用の `RecordingNotifier`。
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}
