//! 日付の書式（保存キー "YYYY-MM-DD" と表示用）

use chrono::{Datelike, NaiveDate};
use common::error::Error;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// 保存キーの形式（"2024-03-01"）
pub fn format_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "YYYY-MM-DD" を解析する
pub fn parse_date_key(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s.trim())))
}

/// "YYYY-MM" を (年, 月) に解析する
pub fn parse_year_month(s: &str) -> Result<(i32, u32), Error> {
    let invalid = || Error::validation(format!("Invalid month '{}' (expected YYYY-MM)", s.trim()));
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(invalid());
    }
    Ok((year, month))
}

/// 月名（1 始まり）
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.clamp(1, 12)) - 1) as usize]
}

/// 表示用の日付（"March 1, 2024"）
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}
