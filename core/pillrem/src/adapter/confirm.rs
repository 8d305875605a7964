//! 確認プロンプトの実装（標準入力 / 固定応答）

use crate::ports::outbound::Confirm;
use std::io::{BufRead, Write};

/// stderr に `<message> [y/N] ` を出し、標準入力の 1 行で判定する
#[derive(Debug, Clone, Default)]
pub struct StdinConfirm;

/// "y" / "yes"（大文字小文字無視）のみ承認
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&line),
        }
    }
}

/// 常に同じ応答を返す（--yes・テスト用）
#[derive(Debug, Clone)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
