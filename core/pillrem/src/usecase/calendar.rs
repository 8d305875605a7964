//! 月カレンダー
//!
//! 日曜始まりの 7 列グリッド。1 日の曜日だけ先頭を空け、最終週の残りも空セルで埋める。
//! 各日にはその日の履歴レコードを「名前 (状態)」で並べる。

use crate::domain::dates::month_name;
use crate::domain::{MonthCursor, RecordBook};
use crate::usecase::SessionState;
use chrono::{Datelike, NaiveDate};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 日付セル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    /// 「名前 (状態)」の一覧
    pub lines: Vec<String>,
}

impl DayCell {
    pub fn has_records(&self) -> bool {
        !self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    /// 例: "March 2024"
    pub title: String,
    pub weeks: Vec<[Option<DayCell>; 7]>,
    /// 選択中の日付（このグリッドに含まれる場合のみ強調）
    pub active_date: Option<NaiveDate>,
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }
}

pub fn build_month_grid(cursor: MonthCursor, records: &RecordBook) -> MonthGrid {
    let title = format!("{} {}", month_name(cursor.month()), cursor.year());
    let Some(first) = cursor.first_day() else {
        return MonthGrid {
            cursor,
            title,
            weeks: Vec::new(),
            active_date: None,
        };
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = cursor.days_in_month();

    let mut cells: Vec<Option<DayCell>> = vec![None; leading];
    for day in 1..=days {
        let Some(date) = first.with_day(day) else {
            continue;
        };
        let lines = records
            .day(date)
            .iter()
            .map(|r| format!("{} ({})", r.name, r.status))
            .collect();
        cells.push(Some(DayCell { day, date, lines }));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let weeks = cells
        .chunks(7)
        .map(|chunk| std::array::from_fn(|i| chunk[i].clone()))
        .collect();
    MonthGrid {
        cursor,
        title,
        weeks,
        active_date: None,
    }
}

pub struct CalendarUseCase {
    log: Arc<dyn Log>,
}

impl CalendarUseCase {
    pub fn new(log: Arc<dyn Log>) -> Self {
        Self { log }
    }

    /// 現在の表示月を描く
    pub fn current(&self, state: &SessionState) -> MonthGrid {
        let mut grid = build_month_grid(state.cursor, &state.store.records);
        grid.active_date = Some(state.active_date).filter(|d| state.cursor.contains(*d));
        grid
    }

    /// 表示月を指定して描く
    pub fn show(&self, state: &mut SessionState, year: i32, month: u32) -> Result<MonthGrid, Error> {
        state.cursor = MonthCursor::new(year, month)
            .ok_or_else(|| Error::validation(format!("Invalid month: {}", month)))?;
        Ok(self.current(state))
    }

    /// 表示月を offset か月動かして描く
    pub fn change_month(&self, state: &mut SessionState, offset: i32) -> MonthGrid {
        state.cursor.change_month(offset);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "usecase", "calendar", "month changed")
                .field("year", state.cursor.year())
                .field("month", state.cursor.month()),
        );
        self.current(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, IntakeStatus, RecordEntry, RecordSource, TimeOfDay};

    fn record(name: &str, status: IntakeStatus) -> RecordEntry {
        RecordEntry {
            id: 1,
            name: name.to_string(),
            time: ClockTime::parse("08:00").unwrap(),
            status,
            time_of_day: Some(TimeOfDay::Morning),
            source: RecordSource::Manual,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_march_2024_layout() {
        // 2024-03-01 は金曜日
        let grid = build_month_grid(MonthCursor::new(2024, 3).unwrap(), &RecordBook::new());
        assert_eq!(grid.title, "March 2024");
        assert_eq!(grid.weeks.len(), 6);
        assert!(grid.weeks[0][..5].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0][5].as_ref().map(|c| c.day), Some(1));
        assert_eq!(grid.cells().count(), 31);
        assert_eq!(grid.weeks[5][0].as_ref().map(|c| c.day), Some(31));
        assert!(grid.weeks[5][1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_february_starting_sunday_has_no_leading_blanks() {
        // 2026-02-01 は日曜日、28 日でちょうど 4 週
        let grid = build_month_grid(MonthCursor::new(2026, 2).unwrap(), &RecordBook::new());
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[0][0].as_ref().map(|c| c.day), Some(1));
        assert!(grid.weeks.iter().all(|w| w.iter().all(Option::is_some)));
    }

    #[test]
    fn test_cells_show_records() {
        let mut records = RecordBook::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        records.push(date, record("Aspirin", IntakeStatus::Taken));
        records.push(date, record("Zinc", IntakeStatus::Missed));
        let grid = build_month_grid(MonthCursor::new(2024, 3).unwrap(), &records);
        let cell = grid.cells().find(|c| c.date == date).unwrap();
        assert!(cell.has_records());
        assert_eq!(cell.lines, vec!["Aspirin (taken)", "Zinc (missed)"]);
        assert_eq!(grid.cells().filter(|c| c.has_records()).count(), 1);
    }
}
