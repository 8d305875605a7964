//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    dirs_under_home, FileJsonLog, FileKeyValueStore, StdClock, StdEnvResolver, StdFileSystem,
};
use common::domain::HomeDir;
use common::error::Error;
use common::ports::outbound::{Clock, EnvResolver, FileSystem, KeyValueStore, Log};

use crate::adapter::{AutoConfirm, ConsoleNotifier, LoggingKeyValueStore, StdinConfirm};
use crate::dispatch::Dispatcher;
use crate::ports::outbound::{Confirm, Notifier};
use crate::usecase::{
    CalendarUseCase, EntryUseCase, ExportUseCase, ReconcileUseCase, RecordsUseCase,
    SessionUseCase, SettingsUseCase,
};

/// UseCase に注入する Outbound ポート一式
pub struct Ports {
    pub fs: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
    pub kv: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn Confirm>,
    pub log: Arc<dyn Log>,
}

/// 配線で組み立てた UseCase 群とディスパッチテーブル
pub struct App {
    pub session_use_case: SessionUseCase,
    pub reconcile_use_case: Arc<ReconcileUseCase>,
    pub entry_use_case: EntryUseCase,
    pub calendar_use_case: CalendarUseCase,
    pub records_use_case: RecordsUseCase,
    pub settings_use_case: SettingsUseCase,
    pub export_use_case: ExportUseCase,
    pub dispatcher: Dispatcher,
    /// エラー表示（シェル）に使う
    pub notifier: Arc<dyn Notifier>,
    /// 構造化ログ（ファイルへ JSONL）
    pub logger: Arc<dyn Log>,
}

impl App {
    pub fn with_ports(ports: Ports) -> Self {
        let Ports {
            fs,
            clock,
            kv,
            notifier,
            confirm,
            log,
        } = ports;
        let reconcile_use_case = Arc::new(ReconcileUseCase::new(
            Arc::clone(&clock),
            Arc::clone(&notifier),
            Arc::clone(&log),
        ));
        App {
            session_use_case: SessionUseCase::new(
                kv,
                Arc::clone(&clock),
                Arc::clone(&notifier),
                Arc::clone(&log),
                Arc::clone(&reconcile_use_case),
            ),
            entry_use_case: EntryUseCase::new(
                Arc::clone(&clock),
                Arc::clone(&notifier),
                Arc::clone(&confirm),
                Arc::clone(&log),
                Arc::clone(&reconcile_use_case),
            ),
            calendar_use_case: CalendarUseCase::new(Arc::clone(&log)),
            records_use_case: RecordsUseCase::new(
                Arc::clone(&clock),
                Arc::clone(&notifier),
                confirm,
                Arc::clone(&log),
            ),
            settings_use_case: SettingsUseCase::new(Arc::clone(&notifier), Arc::clone(&log)),
            export_use_case: ExportUseCase::new(fs, Arc::clone(&notifier), Arc::clone(&log)),
            reconcile_use_case,
            dispatcher: Dispatcher::new(),
            notifier,
            logger: log,
        }
    }
}

/// 配線: 標準アダプタで App を組み立てる
///
/// home_dir（-d/--home-dir）があればその配下、無ければ PILLREM_HOME / XDG / HOME から解決する。
/// assume_yes なら削除の確認に常に yes と答える。
pub fn wire_pillrem(home_dir: Option<&str>, assume_yes: bool) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let dirs = match home_dir {
        Some(h) => dirs_under_home(&HomeDir::new(h)),
        None => StdEnvResolver.resolve_dirs()?,
    };
    let log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), dirs.log_file()));
    let kv: Arc<dyn KeyValueStore> = Arc::new(LoggingKeyValueStore::new(
        Arc::new(FileKeyValueStore::new(Arc::clone(&fs), dirs.storage_dir())),
        Arc::clone(&log),
    ));
    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };
    Ok(App::with_ports(Ports {
        fs,
        clock: Arc::new(StdClock),
        kv,
        notifier: Arc::new(ConsoleNotifier),
        confirm,
        log,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_under_home_dir_persists_files() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_string_lossy().to_string();
        let app = wire_pillrem(Some(&home), true).unwrap();
        let mut state = app.session_use_case.start();
        app.settings_use_case
            .set(&mut state.store, "theme", "dark")
            .unwrap();

        let storage = dir.path().join("data/storage");
        assert!(storage.join("pillReminderSettings.json").is_file());
        assert!(storage.join("pillReminderRecords.json").is_file());
        assert!(dir.path().join("state/logs/pillrem.jsonl").is_file());
    }
}
