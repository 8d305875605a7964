pub(crate) mod calendar;
pub(crate) mod entries;
pub(crate) mod export;
pub(crate) mod reconcile;
pub(crate) mod records;
pub(crate) mod session;
pub(crate) mod settings;

pub(crate) use calendar::{CalendarUseCase, MonthGrid};
pub(crate) use entries::{EntryUseCase, TodayView};
pub(crate) use export::{ExportOutcome, ExportUseCase};
pub(crate) use reconcile::{ReconcileSummary, ReconcileUseCase};
pub(crate) use records::{DayListing, EditOutcome, RecordsUseCase};
pub(crate) use session::{SessionState, SessionUseCase};
pub(crate) use settings::SettingsUseCase;

use crate::ports::outbound::{Notifier, Severity};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

/// 書き込み結果を処理する。
///
/// 失敗しても呼び出し元には返さない。警告を通知・記録し、メモリ上の状態で続行する。
/// 書き込めたら true。
pub(crate) fn persist_or_warn(
    result: Result<(), Error>,
    notifier: &dyn Notifier,
    log: &dyn Log,
    kind: &str,
) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            notifier.notify(
                &format!("{}. Changes are kept for this session only.", e),
                Severity::Warning,
            );
            let _ = log.log(
                &LogRecord::new(LogLevel::Error, "usecase", kind, "persist failed")
                    .field("error", e.to_string()),
            );
            false
        }
    }
}
