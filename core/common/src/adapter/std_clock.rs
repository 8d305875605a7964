//! 時刻の実装（ローカル時刻の委譲と、テスト用の固定時刻）

use crate::ports::outbound::Clock;
use chrono::{DateTime, Local, TimeZone};

/// chrono::Local::now() を使う Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// 常に同じ時刻を返す Clock 実装（テスト用）
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// ローカル時刻の年月日時分から作る。存在しない時刻（DST の隙間など）は None。
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at(2024, 3, 1, 8, 0).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(clock.now_ms(), clock.now().timestamp_millis());
    }

    #[test]
    fn test_now_iso8601_is_utc_millis() {
        let clock = FixedClock::at(2024, 3, 1, 8, 0).unwrap();
        let iso = clock.now_iso8601();
        assert!(iso.ends_with('Z'), "{}", iso);
        assert!(iso.contains(".000"), "{}", iso);
    }
}
