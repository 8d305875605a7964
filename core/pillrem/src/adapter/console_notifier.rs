//! stderr に通知を出す Notifier 実装

use crate::ports::outbound::{Notifier, Severity};

/// `[success] ...` の形式で 1 行ずつ stderr に書く
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format_line(message: &str, severity: Severity) -> String {
        format!("[{}] {}", severity.as_str(), message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        eprintln!("{}", Self::format_line(message, severity));
    }
}
