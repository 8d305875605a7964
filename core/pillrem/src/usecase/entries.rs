//! 日次エントリ（今日の服用予定）のユースケース
//!
//! 変更のたびにエントリを書き戻し、続けて今日の履歴レコードを同期する。

use crate::domain::{ClockTime, IntakeStatus, MedicineEntry, TimeOfDay};
use crate::ports::outbound::{Confirm, Notifier, Severity};
use crate::store::PillStore;
use crate::usecase::{persist_or_warn, ReconcileUseCase};
use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 今日の 3 時間帯（各時間帯は新しい順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayView {
    pub date: NaiveDate,
    pub slots: Vec<(TimeOfDay, Vec<MedicineEntry>)>,
}

pub struct EntryUseCase {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    log: Arc<dyn Log>,
    reconciler: Arc<ReconcileUseCase>,
}

impl EntryUseCase {
    pub fn new(
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        log: Arc<dyn Log>,
        reconciler: Arc<ReconcileUseCase>,
    ) -> Self {
        Self {
            clock,
            notifier,
            confirm,
            log,
            reconciler,
        }
    }

    /// 今日の指定時間帯に追加する。time が無ければ時間帯の既定時刻。
    pub fn add(
        &self,
        store: &mut PillStore,
        slot: TimeOfDay,
        name: &str,
        time: Option<ClockTime>,
    ) -> Result<MedicineEntry, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("Please enter a medicine name"));
        }
        let today = self.clock.today();
        let day = store.entries.day_mut(today);
        let entry = MedicineEntry {
            id: day.unique_id_from(self.clock.now_ms()),
            name: name.to_string(),
            time: time.unwrap_or_else(|| slot.default_time()),
            timestamp: self.clock.now_iso8601(),
            status: None,
        };
        day.slot_mut(slot).push(entry.clone());

        self.after_change(store, "entry added", &entry, slot);
        self.notifier.notify(
            &format!("{} added to {} medications", entry.name, slot.as_str()),
            Severity::Success,
        );
        Ok(entry)
    }

    pub fn set_status(
        &self,
        store: &mut PillStore,
        slot: TimeOfDay,
        id: i64,
        status: IntakeStatus,
    ) -> Result<MedicineEntry, Error> {
        let today = self.clock.today();
        let entry = store
            .entries
            .medications
            .get_mut(&today)
            .and_then(|day| day.find_mut(slot, id))
            .ok_or_else(|| Error::not_found(format!("Medication {} not found in {}", id, slot.as_str())))?;
        entry.status = Some(status);
        let entry = entry.clone();

        self.after_change(store, "entry status changed", &entry, slot);
        self.notifier.notify(
            &format!("{} marked as {}", entry.name, status.as_str()),
            Severity::Success,
        );
        Ok(entry)
    }

    /// 確認の上で削除する。断られたら何も変えずに Ok(None)。
    pub fn remove(
        &self,
        store: &mut PillStore,
        slot: TimeOfDay,
        id: i64,
    ) -> Result<Option<MedicineEntry>, Error> {
        let today = self.clock.today();
        let name = store
            .entries
            .day(today)
            .and_then(|day| day.slot(slot).iter().find(|e| e.id == id))
            .map(|e| e.name.clone())
            .ok_or_else(|| Error::not_found(format!("Medication {} not found in {}", id, slot.as_str())))?;

        let question = format!(
            "Are you sure you want to delete \"{}\" from {} medications?",
            name,
            slot.as_str()
        );
        if !self.confirm.confirm(&question) {
            return Ok(None);
        }

        let removed = store.entries.day_mut(today).remove(slot, id);
        store.entries.prune(today);
        let Some(removed) = removed else {
            return Ok(None);
        };

        self.after_change(store, "entry removed", &removed, slot);
        self.notifier.notify(
            &format!("{} removed from {} medications", removed.name, slot.as_str()),
            Severity::Info,
        );
        Ok(Some(removed))
    }

    pub fn today(&self, store: &PillStore) -> TodayView {
        let date = self.clock.today();
        let slots = TimeOfDay::ALL
            .into_iter()
            .map(|tod| {
                let entries = store
                    .entries
                    .day(date)
                    .map(|day| day.slot(tod).iter().rev().cloned().collect())
                    .unwrap_or_default();
                (tod, entries)
            })
            .collect();
        TodayView { date, slots }
    }

    fn after_change(&self, store: &mut PillStore, message: &str, entry: &MedicineEntry, slot: TimeOfDay) {
        persist_or_warn(
            store.save_entries(),
            self.notifier.as_ref(),
            self.log.as_ref(),
            "entries",
        );
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "entries", message)
                .field("id", entry.id)
                .field("slot", slot.as_str()),
        );
        self.reconciler.reconcile_today(store);
    }
}
