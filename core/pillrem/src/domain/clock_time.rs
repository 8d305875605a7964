//! 24 時間制の時刻（"HH:MM"）

use common::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 検証済みの "HH:MM"。(時, 分) の順で比較するため、並べ替えはゼロ埋め HHMM の辞書順と一致する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, Error> {
        if hour > 23 || minute > 59 {
            return Err(Error::validation(format!(
                "Invalid time {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub(crate) const fn new_unchecked(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// "HH:MM" を解析する。時は 1〜2 桁、分は 2 桁。
    /// 古いデータにある 12 時間制（"8:00 AM"）も受け付ける。
    pub fn parse(s: &str) -> Result<Self, Error> {
        let invalid = || Error::validation(format!("Invalid time '{}' (expected HH:MM)", s.trim()));
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        let (clock, pm) = match upper.strip_suffix("AM").or_else(|| upper.strip_suffix("PM")) {
            Some(rest) => (rest.trim_end(), Some(upper.ends_with("PM"))),
            None => (trimmed, None),
        };
        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        let digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        let hour = match pm {
            None => hour,
            Some(_) if !(1..=12).contains(&hour) => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };
        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// 12 時間制の表示（"8:00 AM", "12:30 PM", "12:00 AM"）
    pub fn to_12h(&self) -> String {
        let period = if self.hour >= 12 { "PM" } else { "AM" };
        let display_hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.minute, period)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(ClockTime::parse("08:00").unwrap(), ClockTime::new(8, 0).unwrap());
        assert_eq!(ClockTime::parse("8:05").unwrap().to_string(), "08:05");
        assert_eq!(ClockTime::parse("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "24:00", "12:60", "12", "12:5", "ab:cd", "-1:00", "123:00", "13:00 PM", "0:30 AM", "PM"] {
            assert!(ClockTime::parse(s).is_err(), "{} should be rejected", s);
        }
    }

    #[test]
    fn test_parse_12h_form() {
        let t = |s: &str| ClockTime::parse(s).unwrap().to_string();
        assert_eq!(t("8:00 AM"), "08:00");
        assert_eq!(t("12:00 AM"), "00:00");
        assert_eq!(t("12:30 pm"), "12:30");
        assert_eq!(t("11:59PM"), "23:59");
    }

    #[test]
    fn test_to_12h() {
        let t = |s: &str| ClockTime::parse(s).unwrap().to_12h();
        assert_eq!(t("00:00"), "12:00 AM");
        assert_eq!(t("08:00"), "8:00 AM");
        assert_eq!(t("12:30"), "12:30 PM");
        assert_eq!(t("13:05"), "1:05 PM");
        assert_eq!(t("23:59"), "11:59 PM");
    }

    #[test]
    fn test_ordering_matches_hhmm() {
        let mut times: Vec<ClockTime> = ["23:59", "00:00", "13:00", "08:00", "09:30"]
            .iter()
            .map(|s| ClockTime::parse(s).unwrap())
            .collect();
        times.sort();
        let out: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        assert_eq!(out, vec!["00:00", "08:00", "09:30", "13:00", "23:59"]);
    }

    #[test]
    fn test_serde_as_string() {
        let t = ClockTime::parse("20:00").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"20:00\"");
        let back: ClockTime = serde_json::from_str("\"20:00\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }
}
