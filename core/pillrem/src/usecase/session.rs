//! セッションの開始（ストア読み込み・今日の同期）とセッション状態

use crate::domain::MonthCursor;
use crate::ports::outbound::{Notifier, Severity};
use crate::store::PillStore;
use crate::usecase::ReconcileUseCase;
use chrono::NaiveDate;
use common::error::Error;
use common::ports::outbound::{Clock, KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 1 セッション分の状態。シェルでは行をまたいで保持する。
pub struct SessionState {
    pub store: PillStore,
    /// カレンダーの表示月
    pub cursor: MonthCursor,
    /// 選択中の日付（edit / delete の対象）
    pub active_date: NaiveDate,
}

impl SessionState {
    pub fn new(store: PillStore, today: NaiveDate) -> Self {
        Self {
            store,
            cursor: MonthCursor::containing(today),
            active_date: today,
        }
    }
}

pub struct SessionUseCase {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn Log>,
    reconciler: Arc<ReconcileUseCase>,
}

impl SessionUseCase {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        log: Arc<dyn Log>,
        reconciler: Arc<ReconcileUseCase>,
    ) -> Self {
        Self {
            kv,
            clock,
            notifier,
            log,
            reconciler,
        }
    }

    /// ストアを読み込み、今日の homepage レコードを同期して状態を作る。
    /// 壊れたキーは空として、読めないレコードは飛ばして扱い、警告を通知するだけで失敗しない。
    pub fn start(&self) -> SessionState {
        let (mut store, warnings) = PillStore::load(Arc::clone(&self.kv), self.log.as_ref());
        for w in &warnings {
            let message = match w {
                Error::StorageRead { .. } => format!("{}. Starting with empty data.", w),
                _ => format!("{}. Other records were kept.", w),
            };
            self.notifier.notify(&message, Severity::Warning);
        }
        self.reconciler.reconcile_today(&mut store);
        let today = self.clock.today();
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "lifecycle", "session started")
                .field("today", today.to_string())
                .field("load_warnings", warnings.len()),
        );
        SessionState::new(store, today)
    }
}
