//! 日付ごとの履歴レコード一覧と、その場での編集・削除

use crate::domain::dates::format_display_date;
use crate::domain::{IntakeStatus, MonthCursor, RecordEntry, TimeOfDay};
use crate::ports::outbound::{Confirm, Notifier, Severity};
use crate::store::PillStore;
use crate::usecase::{persist_or_warn, SessionState};
use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

const UNSPECIFIED_LABEL: &str = "Unspecified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub record: RecordEntry,
    /// 今日ホーム画面から同期されたレコード
    pub today_badge: bool,
}

/// 時間帯ごとのまとまり。time_of_day が None なら timeOfDay の無い古いレコード。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGroup {
    pub time_of_day: Option<TimeOfDay>,
    pub rows: Vec<RecordRow>,
}

impl RecordGroup {
    pub fn label(&self) -> &'static str {
        self.time_of_day.map(|t| t.label()).unwrap_or(UNSPECIFIED_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayListing {
    pub date: NaiveDate,
    /// 例: "March 1, 2024"
    pub title: String,
    /// 空の時間帯は含めない
    pub groups: Vec<RecordGroup>,
}

impl DayListing {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// 編集結果。rejected は受け付けなかった項目の理由。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub record: RecordEntry,
    pub rejected: Vec<String>,
}

pub struct RecordsUseCase {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    log: Arc<dyn Log>,
}

impl RecordsUseCase {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            clock,
            notifier,
            confirm,
            log,
        }
    }

    /// 日付を選択する。カレンダーもその日付の月へ移る。
    pub fn select_date(&self, state: &mut SessionState, date: NaiveDate) -> DayListing {
        state.active_date = date;
        if !state.cursor.contains(date) {
            state.cursor = MonthCursor::containing(date);
        }
        self.listing(&state.store, date)
    }

    /// 時刻昇順（同時刻は保存順）で時間帯ごとにまとめる
    pub fn listing(&self, store: &PillStore, date: NaiveDate) -> DayListing {
        let today = self.clock.today();
        let mut sorted: Vec<&RecordEntry> = store.records.day(date).iter().collect();
        sorted.sort_by_key(|r| r.time);

        let slots = TimeOfDay::ALL.into_iter().map(Some).chain(std::iter::once(None));
        let groups = slots
            .filter_map(|tod| {
                let rows: Vec<RecordRow> = sorted
                    .iter()
                    .filter(|r| r.time_of_day == tod)
                    .map(|r| RecordRow {
                        record: (*r).clone(),
                        // 古いレコードは timestamp を持たないので、その場合は日付キーで判定する
                        today_badge: r.is_homepage() && r.created_on().unwrap_or(date) == today,
                    })
                    .collect();
                (!rows.is_empty()).then_some(RecordGroup { time_of_day: tod, rows })
            })
            .collect();

        DayListing {
            date,
            title: format_display_date(date),
            groups,
        }
    }

    /// 選択中の日付のレコードを編集する。
    ///
    /// 空の名前・taken / missed 以外の状態はその項目だけ拒否し、残りは反映する。
    /// 1 項目も反映できなければ ValidationError。
    pub fn edit(
        &self,
        state: &mut SessionState,
        id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<EditOutcome, Error> {
        if name.is_none() && status.is_none() {
            return Err(Error::invalid_argument("edit needs name=<text> and/or status=<taken|missed>"));
        }
        let date = state.active_date;
        let record = state
            .store
            .records
            .find_mut(date, id)
            .ok_or_else(|| Error::not_found("Record not found!"))?;

        let mut rejected = Vec::new();
        let mut new_name = None;
        let mut new_status = None;
        if let Some(n) = name {
            let n = n.trim();
            if n.is_empty() {
                rejected.push("Medicine name cannot be empty".to_string());
            } else {
                new_name = Some(n.to_string());
            }
        }
        if let Some(s) = status {
            match IntakeStatus::parse(s) {
                Some(st) => new_status = Some(st),
                None => rejected.push(format!("Invalid status '{}' (use taken or missed)", s.trim())),
            }
        }
        if new_name.is_none() && new_status.is_none() {
            return Err(Error::validation(rejected.join("; ")));
        }

        if let Some(n) = new_name {
            record.name = n;
        }
        if let Some(st) = new_status {
            record.status = st;
        }
        let record = record.clone();

        for reason in &rejected {
            self.notifier.notify(reason, Severity::Warning);
        }
        persist_or_warn(
            state.store.save_records(),
            self.notifier.as_ref(),
            self.log.as_ref(),
            "records",
        );
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "records", "record edited")
                .field("date", date.to_string())
                .field("id", id)
                .field("rejected", rejected.len()),
        );
        self.notifier.notify("Record updated successfully!", Severity::Success);
        Ok(EditOutcome { record, rejected })
    }

    /// 選択中の日付から削除する。断られたら Ok(None)。
    pub fn delete(&self, state: &mut SessionState, id: i64) -> Result<Option<RecordEntry>, Error> {
        let date = state.active_date;
        let name = state
            .store
            .records
            .day(date)
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.clone())
            .ok_or_else(|| Error::not_found("Record not found!"))?;

        if !self
            .confirm
            .confirm(&format!("Are you sure you want to delete the record for {}?", name))
        {
            return Ok(None);
        }
        let removed = state.store.records.remove(date, id);

        persist_or_warn(
            state.store.save_records(),
            self.notifier.as_ref(),
            self.log.as_ref(),
            "records",
        );
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "records", "record deleted")
                .field("date", date.to_string())
                .field("id", id),
        );
        self.notifier.notify("Record deleted successfully!", Severity::Success);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AutoConfirm, RecordingNotifier};
    use crate::domain::{ClockTime, RecordSource};
    use common::adapter::{FixedClock, MemoryKeyValueStore, NoopLog};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn record(id: i64, time: &str, tod: Option<TimeOfDay>, source: RecordSource) -> RecordEntry {
        RecordEntry {
            id,
            name: format!("med{}", id),
            time: ClockTime::parse(time).unwrap(),
            status: IntakeStatus::Missed,
            time_of_day: tod,
            source,
            timestamp: String::new(),
        }
    }

    fn setup(confirm: bool) -> (RecordsUseCase, SessionState, Arc<RecordingNotifier>) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let (store, _) = PillStore::load(kv, &NoopLog);
        let notifier = Arc::new(RecordingNotifier::new());
        let uc = RecordsUseCase::new(
            Arc::new(FixedClock::at(2024, 3, 1, 12, 0).unwrap()),
            notifier.clone(),
            Arc::new(AutoConfirm(confirm)),
            Arc::new(NoopLog),
        );
        let state = SessionState::new(store, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        (uc, state, notifier)
    }

    #[test]
    fn test_listing_sorts_and_groups_with_unspecified_last() {
        let (uc, mut state, _) = setup(true);
        let m = Some(TimeOfDay::Morning);
        state.store.records.push(date(), record(1, "23:59", Some(TimeOfDay::Evening), RecordSource::Manual));
        state.store.records.push(date(), record(2, "09:00", m, RecordSource::Homepage));
        state.store.records.push(date(), record(3, "00:00", m, RecordSource::Manual));
        state.store.records.push(date(), record(4, "10:00", None, RecordSource::Manual));

        let listing = uc.select_date(&mut state, date());
        let labels: Vec<&str> = listing.groups.iter().map(|g| g.label()).collect();
        assert_eq!(labels, vec!["Morning", "Evening", "Unspecified"]);
        let morning: Vec<i64> = listing.groups[0].rows.iter().map(|r| r.record.id).collect();
        assert_eq!(morning, vec![3, 2]);
        assert!(listing.groups[0].rows[1].today_badge);
        assert!(!listing.groups[0].rows[0].today_badge);
    }

    #[test]
    fn test_today_badge_follows_record_timestamp() {
        let (uc, mut state, _) = setup(true);
        let clock = FixedClock::at(2024, 3, 1, 12, 0).unwrap();
        let mut fresh = record(1, "08:00", Some(TimeOfDay::Morning), RecordSource::Homepage);
        fresh.timestamp = clock.now_iso8601();
        let mut stale = record(2, "09:00", Some(TimeOfDay::Morning), RecordSource::Homepage);
        stale.timestamp = "2024-02-20T12:00:00.000Z".to_string();
        state.store.records.push(date(), fresh);
        state.store.records.push(date(), stale);

        let listing = uc.select_date(&mut state, date());
        let badges: Vec<bool> = listing.groups[0].rows.iter().map(|r| r.today_badge).collect();
        assert_eq!(badges, vec![true, false]);
    }

    #[test]
    fn test_select_date_moves_calendar() {
        let (uc, mut state, _) = setup(true);
        let listing = uc.select_date(&mut state, date());
        assert!(listing.is_empty());
        assert_eq!(listing.title, "March 1, 2024");
        assert_eq!(state.cursor, MonthCursor::new(2024, 3).unwrap());
        assert_eq!(state.active_date, date());
    }

    #[test]
    fn test_edit_invalid_status_keeps_previous_status() {
        let (uc, mut state, notifier) = setup(true);
        state.store.records.push(date(), record(1, "08:00", None, RecordSource::Manual));
        uc.select_date(&mut state, date());

        let err = uc.edit(&mut state, 1, None, Some("done")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(state.store.records.day(date())[0].status, IntakeStatus::Missed);

        let outcome = uc.edit(&mut state, 1, Some("Aspirin"), Some("done")).unwrap();
        assert_eq!(outcome.record.name, "Aspirin");
        assert_eq!(outcome.record.status, IntakeStatus::Missed);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(notifier.count(Severity::Warning), 1);

        let outcome = uc.edit(&mut state, 1, Some(" "), Some(" TAKEN ")).unwrap();
        assert_eq!(outcome.record.name, "Aspirin");
        assert_eq!(outcome.record.status, IntakeStatus::Taken);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let (uc, mut state, _) = setup(true);
        uc.select_date(&mut state, date());
        let err = uc.edit(&mut state, 42, Some("x"), None).unwrap_err();
        assert_eq!(err, Error::not_found("Record not found!"));
    }

    #[test]
    fn test_delete_only_record_removes_date_key() {
        let (uc, mut state, notifier) = setup(true);
        state.store.records.push(date(), record(1, "08:00", None, RecordSource::Manual));
        uc.select_date(&mut state, date());
        let removed = uc.delete(&mut state, 1).unwrap();
        assert_eq!(removed.map(|r| r.id), Some(1));
        assert!(!state.store.records.contains_date(date()));
        assert_eq!(
            notifier.last(),
            Some((Severity::Success, "Record deleted successfully!".to_string()))
        );
    }

    #[test]
    fn test_delete_declined_keeps_record() {
        let (uc, mut state, _) = setup(false);
        state.store.records.push(date(), record(1, "08:00", None, RecordSource::Manual));
        uc.select_date(&mut state, date());
        assert_eq!(uc.delete(&mut state, 1).unwrap(), None);
        assert_eq!(state.store.records.day(date()).len(), 1);
    }
}
