//! 日次エントリ → 履歴レコードの同期
//!
//! 指定日の homepage レコードをすべて捨て、その日のエントリから作り直す。
//! homepage 以外のレコードには触れない。何度呼んでも結果は同じ。

use crate::domain::RecordEntry;
use crate::ports::outbound::Notifier;
use crate::store::{PillStore, RECORDS_KEY};
use crate::usecase::persist_or_warn;
use chrono::NaiveDate;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 同期 1 回分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub date: NaiveDate,
    /// 作り直した homepage レコード数
    pub homepage: usize,
    /// 残した homepage 以外のレコード数
    pub kept: usize,
    /// 書き込みに失敗していないか（書き込む必要がなかった場合も true）
    pub saved: bool,
}

pub struct ReconcileUseCase {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn Log>,
}

impl ReconcileUseCase {
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>, log: Arc<dyn Log>) -> Self {
        Self { clock, notifier, log }
    }

    /// 今日の日付で同期する
    pub fn reconcile_today(&self, store: &mut PillStore) -> ReconcileSummary {
        let today = self.clock.today();
        self.reconcile(store, today)
    }

    pub fn reconcile(&self, store: &mut PillStore, date: NaiveDate) -> ReconcileSummary {
        let fresh: Vec<RecordEntry> = store
            .entries
            .day(date)
            .map(|day| {
                day.iter()
                    .map(|(tod, entry)| RecordEntry::from_entry(tod, entry))
                    .collect()
            })
            .unwrap_or_default();
        let homepage = fresh.len();
        let before = store.records.day(date).to_vec();
        store.records.replace_homepage(date, fresh);
        let kept = store.records.day(date).len() - homepage;

        // 読み込みで飛ばしたデータが残るキーは、実際に変わるまで上書きしない
        let changed = store.records.day(date) != before.as_slice();
        let saved = if changed || !store.is_held(RECORDS_KEY) {
            persist_or_warn(
                store.save_records(),
                self.notifier.as_ref(),
                self.log.as_ref(),
                "reconcile",
            )
        } else {
            true
        };
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "reconcile", "records reconciled")
                .field("date", date.to_string())
                .field("homepage", homepage)
                .field("kept", kept)
                .field("changed", changed)
                .field("saved", saved),
        );
        ReconcileSummary {
            date,
            homepage,
            kept,
            saved,
        }
    }
}
