//! 履歴レコード（カレンダー・記録画面の表示用スナップショット）
//!
//! 永続形式: `{ "YYYY-MM-DD": [RecordEntry, ...] }`

use super::dates::parse_date_key;
use super::status::status_or_missed;
use super::{ClockTime, IntakeStatus, MedicineEntry, TimeOfDay};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// レコードの出どころ。"homepage" は日次エントリから同期したもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordSource {
    Homepage,
    /// 直接入力・その他。未知の値や欠落もここに入る。
    #[default]
    Manual,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSource::Homepage => "homepage",
            RecordSource::Manual => "manual",
        }
    }
}

impl Serialize for RecordSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("homepage") => RecordSource::Homepage,
            _ => RecordSource::Manual,
        })
    }
}

/// 1 件の履歴レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: i64,
    pub name: String,
    pub time: ClockTime,
    #[serde(default, deserialize_with = "status_or_missed")]
    pub status: IntakeStatus,
    /// 古いデータでは欠けていることがある
    #[serde(
        rename = "timeOfDay",
        default,
        deserialize_with = "time_of_day_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub source: RecordSource,
    #[serde(default)]
    pub timestamp: String,
}

impl RecordEntry {
    /// 日次エントリから homepage レコードを作る（未設定の status は missed）
    pub fn from_entry(time_of_day: TimeOfDay, entry: &MedicineEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            time: entry.time,
            status: entry.status.unwrap_or_default(),
            time_of_day: Some(time_of_day),
            source: RecordSource::Homepage,
            timestamp: entry.timestamp.clone(),
        }
    }

    pub fn is_homepage(&self) -> bool {
        self.source == RecordSource::Homepage
    }

    /// timestamp のローカル日付。空・解釈できない場合は None。
    pub fn created_on(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Local).date_naive())
    }
}

/// 保存済みの timeOfDay を読む。大文字小文字は問わず、未知の値は None（Unspecified）。
fn time_of_day_or_none<'de, D>(deserializer: D) -> Result<Option<TimeOfDay>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| TimeOfDay::parse(s).ok()))
}

/// 履歴レコードストア全体。空の日付バケットは持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordBook(BTreeMap<NaiveDate, Vec<RecordEntry>>);

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存形式を 1 件ずつ読む。
    ///
    /// 最上位がオブジェクトでなければ Err。読めない日付キー・レコードは飛ばし、
    /// その理由を 2 番目の戻り値で返す。残りのレコードはそのまま使う。
    pub fn from_stored_json(raw: &str) -> Result<(Self, Vec<String>), serde_json::Error> {
        let buckets: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut book = Self::new();
        let mut skipped = Vec::new();
        for (key, bucket) in buckets {
            let date = match parse_date_key(&key) {
                Ok(date) => date,
                Err(e) => {
                    skipped.push(e.to_string());
                    continue;
                }
            };
            let serde_json::Value::Array(items) = bucket else {
                skipped.push(format!("records for {} are not a list", key));
                continue;
            };
            for item in items {
                match serde_json::from_value::<RecordEntry>(item) {
                    Ok(record) => book.push(date, record),
                    Err(e) => skipped.push(format!("record on {}: {}", key, e)),
                }
            }
        }
        Ok((book, skipped))
    }

    /// 指定日のレコード（無ければ空）
    pub fn day(&self, date: NaiveDate) -> &[RecordEntry] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    /// 日付昇順で全バケットを返す
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[RecordEntry])> + '_ {
        self.0.iter().map(|(d, r)| (*d, r.as_slice()))
    }

    /// レコードを末尾に追加する
    pub fn push(&mut self, date: NaiveDate, record: RecordEntry) {
        self.0.entry(date).or_default().push(record);
    }

    /// 指定日の homepage レコードを `fresh` で置き換える。
    /// それ以外のレコードは元の順序のまま残し、`fresh` はその後ろに並ぶ。
    /// 結果が空なら日付キーごと取り除く。
    pub fn replace_homepage(&mut self, date: NaiveDate, fresh: Vec<RecordEntry>) {
        let mut records: Vec<RecordEntry> = self
            .0
            .remove(&date)
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.is_homepage())
            .collect();
        records.extend(fresh);
        if !records.is_empty() {
            self.0.insert(date, records);
        }
    }

    pub fn find_mut(&mut self, date: NaiveDate, id: i64) -> Option<&mut RecordEntry> {
        self.0.get_mut(&date)?.iter_mut().find(|r| r.id == id)
    }

    /// 指定 ID を取り除いて返す。バケットが空になれば日付キーも消す。
    pub fn remove(&mut self, date: NaiveDate, id: i64) -> Option<RecordEntry> {
        let records = self.0.get_mut(&date)?;
        let pos = records.iter().position(|r| r.id == id)?;
        let removed = records.remove(pos);
        if records.is_empty() {
            self.0.remove(&date);
        }
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn record(id: i64, source: RecordSource) -> RecordEntry {
        RecordEntry {
            id,
            name: format!("med{}", id),
            time: ClockTime::parse("08:00").unwrap(),
            status: IntakeStatus::Taken,
            time_of_day: Some(TimeOfDay::Morning),
            source,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_replace_homepage_keeps_manual_records() {
        let mut book = RecordBook::new();
        book.push(date(), record(1, RecordSource::Homepage));
        book.push(date(), record(2, RecordSource::Manual));
        book.replace_homepage(date(), vec![record(3, RecordSource::Homepage)]);
        let ids: Vec<i64> = book.day(date()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_replace_homepage_with_nothing_drops_empty_bucket() {
        let mut book = RecordBook::new();
        book.push(date(), record(1, RecordSource::Homepage));
        book.replace_homepage(date(), Vec::new());
        assert!(!book.contains_date(date()));
        book.replace_homepage(date(), Vec::new());
        assert!(book.is_empty());
    }

    #[test]
    fn test_remove_last_record_drops_date_key() {
        let mut book = RecordBook::new();
        book.push(date(), record(1, RecordSource::Manual));
        assert!(book.remove(date(), 2).is_none());
        assert!(book.remove(date(), 1).is_some());
        assert!(!book.contains_date(date()));
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_deserialize_legacy_record() {
        // status が null、source / timeOfDay が欠けた古い形式
        let json = r#"{"2024-03-01":[{"id":5,"name":"Zinc","dosage":"","time":"21:15","status":null}]}"#;
        let book: RecordBook = serde_json::from_str(json).unwrap();
        let r = &book.day(date())[0];
        assert_eq!(r.status, IntakeStatus::Missed);
        assert_eq!(r.source, RecordSource::Manual);
        assert_eq!(r.time_of_day, None);
    }

    #[test]
    fn test_time_of_day_read_leniently() {
        let json = r#"{"2024-03-01":[
            {"id":1,"name":"A","time":"08:00","timeOfDay":"Morning"},
            {"id":2,"name":"B","time":"09:00","timeOfDay":"brunch"}
        ]}"#;
        let book: RecordBook = serde_json::from_str(json).unwrap();
        let tods: Vec<Option<TimeOfDay>> = book.day(date()).iter().map(|r| r.time_of_day).collect();
        assert_eq!(tods, vec![Some(TimeOfDay::Morning), None]);
    }

    #[test]
    fn test_from_stored_json_skips_only_bad_records() {
        let json = r#"{
            "2024-01-10": [{"id":1,"name":"Kept","time":"08:00"}],
            "2024-03-01": [{"id":2,"name":"Noon","time":"12:00 PM"}, {"id":3,"name":"Bad","time":"late"}],
            "2024-03-02": [{"id":4,"time":"08:00"}],
            "someday": [],
            "2024-03-03": 5
        }"#;
        let (book, skipped) = RecordBook::from_stored_json(json).unwrap();
        assert_eq!(book.day(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())[0].name, "Kept");
        let ids: Vec<i64> = book.day(date()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(book.day(date())[0].time.to_string(), "12:00");
        assert!(!book.contains_date(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));
        assert_eq!(book.len(), 2);
        assert_eq!(skipped.len(), 4);
        assert!(skipped.iter().any(|s| s.starts_with("record on 2024-03-01")));

        assert!(RecordBook::from_stored_json("[1, 2]").is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case_time_of_day() {
        let mut book = RecordBook::new();
        book.push(date(), record(1, RecordSource::Homepage));
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"2024-03-01\""));
        assert!(json.contains("\"timeOfDay\":\"morning\""));
        assert!(json.contains("\"source\":\"homepage\""));
    }
}
