//! 日次エントリ（ホーム画面で登録する服用予定）
//!
//! 永続形式: `{ "medications": { "YYYY-MM-DD": { "morning": [...], "afternoon": [...], "evening": [...] } } }`

use super::{ClockTime, IntakeStatus, TimeOfDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1 件の服用予定。status は未設定（null）/ taken / missed。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    /// 作成時刻（epoch ミリ秒）。同じ日付バケット内で一意。
    pub id: i64,
    pub name: String,
    pub time: ClockTime,
    pub timestamp: String,
    #[serde(default)]
    pub status: Option<IntakeStatus>,
}

/// 1 日分のエントリ（時間帯ごとに挿入順で保持）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntries {
    #[serde(default)]
    pub morning: Vec<MedicineEntry>,
    #[serde(default)]
    pub afternoon: Vec<MedicineEntry>,
    #[serde(default)]
    pub evening: Vec<MedicineEntry>,
}

impl DayEntries {
    pub fn slot(&self, time_of_day: TimeOfDay) -> &[MedicineEntry] {
        match time_of_day {
            TimeOfDay::Morning => &self.morning,
            TimeOfDay::Afternoon => &self.afternoon,
            TimeOfDay::Evening => &self.evening,
        }
    }

    pub fn slot_mut(&mut self, time_of_day: TimeOfDay) -> &mut Vec<MedicineEntry> {
        match time_of_day {
            TimeOfDay::Morning => &mut self.morning,
            TimeOfDay::Afternoon => &mut self.afternoon,
            TimeOfDay::Evening => &mut self.evening,
        }
    }

    /// 朝 → 昼 → 夜、各時間帯は挿入順
    pub fn iter(&self) -> impl Iterator<Item = (TimeOfDay, &MedicineEntry)> + '_ {
        TimeOfDay::ALL
            .into_iter()
            .flat_map(move |tod| self.slot(tod).iter().map(move |e| (tod, e)))
    }

    pub fn is_empty(&self) -> bool {
        TimeOfDay::ALL.iter().all(|tod| self.slot(*tod).is_empty())
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.iter().any(|(_, e)| e.id == id)
    }

    pub fn find_mut(&mut self, time_of_day: TimeOfDay, id: i64) -> Option<&mut MedicineEntry> {
        self.slot_mut(time_of_day).iter_mut().find(|e| e.id == id)
    }

    /// 指定 ID を取り除いて返す
    pub fn remove(&mut self, time_of_day: TimeOfDay, id: i64) -> Option<MedicineEntry> {
        let slot = self.slot_mut(time_of_day);
        let pos = slot.iter().position(|e| e.id == id)?;
        Some(slot.remove(pos))
    }

    /// `candidate` 以上で、このバケットに未使用の ID を返す
    pub fn unique_id_from(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.contains_id(id) {
            id += 1;
        }
        id
    }
}

/// 日次エントリストア全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBook {
    #[serde(default)]
    pub medications: BTreeMap<NaiveDate, DayEntries>,
}

impl EntryBook {
    pub fn day(&self, date: NaiveDate) -> Option<&DayEntries> {
        self.medications.get(&date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayEntries {
        self.medications.entry(date).or_default()
    }

    /// 空になった日付バケットを取り除く
    pub fn prune(&mut self, date: NaiveDate) {
        if self.medications.get(&date).is_some_and(DayEntries::is_empty) {
            self.medications.remove(&date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, name: &str, time: &str) -> MedicineEntry {
        MedicineEntry {
            id,
            name: name.to_string(),
            time: ClockTime::parse(time).unwrap(),
            timestamp: "2024-03-01T08:00:00.000Z".to_string(),
            status: None,
        }
    }

    #[test]
    fn test_iter_order_is_slot_then_insertion() {
        let mut day = DayEntries::default();
        day.evening.push(entry(3, "C", "20:00"));
        day.morning.push(entry(1, "A", "08:00"));
        day.morning.push(entry(2, "B", "09:00"));
        let ids: Vec<i64> = day.iter().map(|(_, e)| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unique_id_from_skips_used() {
        let mut day = DayEntries::default();
        day.morning.push(entry(100, "A", "08:00"));
        day.evening.push(entry(101, "B", "20:00"));
        assert_eq!(day.unique_id_from(100), 102);
        assert_eq!(day.unique_id_from(50), 50);
    }

    #[test]
    fn test_remove_and_prune() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut book = EntryBook::default();
        book.day_mut(date).morning.push(entry(1, "A", "08:00"));
        assert!(book.day_mut(date).remove(TimeOfDay::Morning, 1).is_some());
        assert!(book.day_mut(date).remove(TimeOfDay::Morning, 1).is_none());
        book.prune(date);
        assert!(book.day(date).is_none());
    }

    #[test]
    fn test_deserialize_original_layout() {
        let json = r#"{"medications":{"2024-03-01":{"morning":[{"id":1700000000000,"name":"Aspirin","time":"08:00","timestamp":"2024-03-01T08:00:00.000Z","status":null}],"afternoon":[],"evening":[]}}}"#;
        let book: EntryBook = serde_json::from_str(json).unwrap();
        let day = book.day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
        assert_eq!(day.morning[0].name, "Aspirin");
        assert_eq!(day.morning[0].status, None);
    }
}
