//! カレンダーの表示月（年・月のカーソル）

use chrono::{Datelike, NaiveDate};

/// 表示中の年月。month は 1〜12。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// month が 1〜12 でない、または年が日付として表せない範囲なら None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// 日付を含む月
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// offset か月だけ移動する。12 月 → 翌年 1 月、1 月 → 前年 12 月。
    /// 移動先が表せる範囲を外れるときは動かない。
    pub fn change_month(&mut self, offset: i32) {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(offset);
        let moved = i32::try_from(index.div_euclid(12))
            .ok()
            .and_then(|year| Self::new(year, index.rem_euclid(12) as u32 + 1));
        if let Some(cursor) = moved {
            *self = cursor;
        }
    }

    /// 月の初日
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 月の日数（翌月 1 日の前日）
    pub fn days_in_month(&self) -> u32 {
        let (year, month) = match self.month {
            12 => (self.year.checked_add(1), 1),
            m => (Some(self.year), m + 1),
        };
        year.and_then(|y| NaiveDate::from_ymd_opt(y, month, 1))
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}
