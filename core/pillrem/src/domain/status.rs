//! 服用状態（taken / missed）

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 服用状態。エントリ側では未設定を `Option::None` で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Taken,
    /// レコードでは未設定をこの値として扱う
    #[default]
    Missed,
}

impl IntakeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStatus::Taken => "taken",
            IntakeStatus::Missed => "missed",
        }
    }

    /// 入力文字列を解析する。前後空白を除き大文字小文字を区別しない。
    /// "taken" / "missed" 以外は None。
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "taken" => Some(IntakeStatus::Taken),
            "missed" => Some(IntakeStatus::Missed),
            _ => None,
        }
    }
}

impl fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 保存済みレコードの status を読む。null・未知の値は missed とみなす。
pub fn status_or_missed<'de, D>(deserializer: D) -> Result<IntakeStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(IntakeStatus::parse)
        .unwrap_or(IntakeStatus::Missed))
}
