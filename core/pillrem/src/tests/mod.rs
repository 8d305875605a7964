//! シナリオテスト: ディスパッチテーブル経由でユースケースを動かす
//!
//! ストアは MemoryKeyValueStore、時刻は FixedClock、通知は RecordingNotifier。


use crate::adapter::{AutoConfirm, RecordingNotifier};
use crate::cli::tokenize;
use crate::dispatch::Reply;
use crate::usecase::SessionState;
use crate::wiring::{App, Ports};
use chrono::NaiveDate;
use common::adapter::{FixedClock, MemoryKeyValueStore, NoopLog, StdFileSystem};
use common::error::Error;
use std::sync::Arc;

pub(crate) const ENTRIES: &str = "pillReminderData";
pub(crate) const RECORDS: &str = "pillReminderRecords";

pub(crate) struct Harness {
    pub app: App,
    pub state: SessionState,
    pub kv: Arc<MemoryKeyValueStore>,
    pub notifier: Arc<RecordingNotifier>,
}

/// 2024-03-01 09:00 のセッション
pub(crate) fn harness(kv: MemoryKeyValueStore) -> Harness {
    harness_at(kv, true, (2024, 3, 1, 9, 0))
}

pub(crate) fn harness_at(
    kv: MemoryKeyValueStore,
    confirm: bool,
    (year, month, day, hour, minute): (i32, u32, u32, u32, u32),
) -> Harness {
    let kv = Arc::new(kv);
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = FixedClock::at(year, month, day, hour, minute).expect("valid fixed time");
    let app = App::with_ports(Ports {
        fs: Arc::new(StdFileSystem),
        clock: Arc::new(clock),
        kv: kv.clone(),
        notifier: notifier.clone(),
        confirm: Arc::new(AutoConfirm(confirm)),
        log: Arc::new(NoopLog),
    });
    let state = app.session_use_case.start();
    Harness {
        app,
        state,
        kv,
        notifier,
    }
}

impl Harness {
    /// シェルの 1 行として実行する
    pub fn run(&mut self, line: &str) -> Result<Reply, Error> {
        let tokens = tokenize(line)?;
        let (name, args) = tokens.split_first().expect("non-empty command line");
        self.app
            .dispatcher
            .dispatch_named(&self.app, &mut self.state, name, args)
    }

    /// 永続化された値（JSON）
    pub fn stored(&self, key: &str) -> serde_json::Value {
        self.kv
            .snapshot(key)
            .map(|s| serde_json::from_str(&s).expect("stored JSON"))
            .unwrap_or(serde_json::Value::Null)
    }
}

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub(crate) fn aspirin_entries() -> &'static str {
    r#"{"medications":{"2024-03-01":{"morning":[{"id":1700000000000,"name":"Aspirin","time":"08:00","timestamp":"2024-03-01T08:00:00.000Z","status":null}],"afternoon":[],"evening":[]}}}"#
}
