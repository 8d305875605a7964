//! 表示設定の参照・変更

use crate::domain::{SettingKey, Settings};
use crate::ports::outbound::{Notifier, Severity};
use crate::store::PillStore;
use crate::usecase::persist_or_warn;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct SettingsUseCase {
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn Log>,
}

impl SettingsUseCase {
    pub fn new(notifier: Arc<dyn Notifier>, log: Arc<dyn Log>) -> Self {
        Self { notifier, log }
    }

    pub fn show(&self, store: &PillStore) -> Settings {
        store.settings.clone()
    }

    /// 1 項目を変更して保存する。不正なキー・値は ValidationError で何も変えない。
    pub fn set(&self, store: &mut PillStore, key: &str, value: &str) -> Result<Settings, Error> {
        let key = SettingKey::parse(key)?;
        store.settings.apply(key, value)?;
        persist_or_warn(
            store.save_settings(),
            self.notifier.as_ref(),
            self.log.as_ref(),
            "settings",
        );
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "settings", "setting changed")
                .field("key", key.as_str())
                .field("value", value.trim()),
        );
        self.notifier.notify("Settings saved", Severity::Success);
        Ok(store.settings.clone())
    }
}
