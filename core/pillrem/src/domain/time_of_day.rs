//! 時間帯（朝・昼・夜）
//!
//! 文字列のまま運ばず閉じた enum にする。永続形式は小文字（"morning" など）。

use super::ClockTime;
use common::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1 日を 3 つに分けた時間帯。並び順は表示順（朝 → 昼 → 夜）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    /// 見出し用（先頭大文字）
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    /// 新規エントリの既定時刻
    pub fn default_time(&self) -> ClockTime {
        match self {
            TimeOfDay::Morning => ClockTime::new_unchecked(8, 0),
            TimeOfDay::Afternoon => ClockTime::new_unchecked(13, 0),
            TimeOfDay::Evening => ClockTime::new_unchecked(20, 0),
        }
    }

    /// 時刻から時間帯を推定する（12 時前は朝、18 時前は昼、それ以降は夜）
    pub fn for_time(time: ClockTime) -> Self {
        if time.hour() < 12 {
            TimeOfDay::Morning
        } else if time.hour() < 18 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }

    /// 文字列から解析する（前後空白・大文字小文字は無視）
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            _ => Err(Error::validation(format!(
                "Unknown time of day '{}' (expected morning, afternoon or evening)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(TimeOfDay::parse("morning").unwrap(), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::parse(" Evening ").unwrap(), TimeOfDay::Evening);
        assert!(matches!(TimeOfDay::parse("night"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_for_time_boundaries() {
        let t = |s: &str| ClockTime::parse(s).unwrap();
        assert_eq!(TimeOfDay::for_time(t("00:00")), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::for_time(t("11:59")), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::for_time(t("12:00")), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::for_time(t("17:59")), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::for_time(t("18:00")), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::for_time(t("23:59")), TimeOfDay::Evening);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&TimeOfDay::Afternoon).unwrap(), "\"afternoon\"");
        let t: TimeOfDay = serde_json::from_str("\"evening\"").unwrap();
        assert_eq!(t, TimeOfDay::Evening);
    }

    #[test]
    fn test_default_times() {
        assert_eq!(TimeOfDay::Morning.default_time().to_string(), "08:00");
        assert_eq!(TimeOfDay::Afternoon.default_time().to_string(), "13:00");
        assert_eq!(TimeOfDay::Evening.default_time().to_string(), "20:00");
    }
}
