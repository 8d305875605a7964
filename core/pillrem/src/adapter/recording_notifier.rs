//! 通知を記録する Notifier 実装（テスト用）

use crate::ports::outbound::{Notifier, Severity};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    /// 最後の通知
    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| *s == severity)
            .count()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
