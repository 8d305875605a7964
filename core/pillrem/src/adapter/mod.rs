//! アダプター（pillrem 固有の Outbound ポート実装）

pub(crate) mod confirm;
pub(crate) mod console_notifier;
pub(crate) mod logging_kv_store;
#[cfg(test)]
pub(crate) mod recording_notifier;

pub(crate) use confirm::{AutoConfirm, StdinConfirm};
pub(crate) use console_notifier::ConsoleNotifier;
pub(crate) use logging_kv_store::LoggingKeyValueStore;
#[cfg(test)]
pub(crate) use recording_notifier::RecordingNotifier;
