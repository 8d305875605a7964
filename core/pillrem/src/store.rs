//! 永続ストア（日次エントリ・履歴レコード・設定）
//!
//! セッション開始時に 1 度だけ読み込み、以後はメモリ上の状態を正とする。
//! 変更のたびに該当キーを丸ごと書き戻す（最後の書き込みが勝つ）。

use crate::domain::{EntryBook, RecordBook, Settings};
use common::error::Error;
use common::ports::outbound::{KeyValueStore, Log, LogLevel, LogRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

pub const ENTRIES_KEY: &str = "pillReminderData";
pub const RECORDS_KEY: &str = "pillReminderRecords";
pub const SETTINGS_KEY: &str = "pillReminderSettings";

pub struct PillStore {
    kv: Arc<dyn KeyValueStore>,
    pub entries: EntryBook,
    pub records: RecordBook,
    pub settings: Settings,
    /// 読み込み時に警告が出たキー。書き込みが 1 度成功するまで保持する。
    held: BTreeSet<&'static str>,
}

impl PillStore {
    /// 3 つのキーを読み込む。
    ///
    /// 読めない・壊れているキーは空（既定値）で置き換える。履歴レコードは 1 件ずつ読み、
    /// 読めないレコードだけを飛ばす。理由は 2 番目の戻り値で返す
    /// （キー全体は StorageRead、レコード単位は Validation）。読み込み自体は失敗しない。
    pub fn load(kv: Arc<dyn KeyValueStore>, log: &dyn Log) -> (Self, Vec<Error>) {
        let mut loader = Loader {
            kv: kv.as_ref(),
            warnings: Vec::new(),
            held: BTreeSet::new(),
        };
        let entries: EntryBook = loader.load_or_default(ENTRIES_KEY);
        let records = loader.load_records();
        let settings = loader.load_or_default::<Settings>(SETTINGS_KEY).normalized();
        let Loader { warnings, held, .. } = loader;

        for w in &warnings {
            let _ = log.log(
                &LogRecord::new(LogLevel::Warn, "usecase", "storage", "unreadable stored data skipped")
                    .field("error", w.to_string()),
            );
        }
        let _ = log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "lifecycle", "store loaded")
                .field("entry_dates", entries.medications.len())
                .field("records", records.len()),
        );

        let store = Self {
            kv,
            entries,
            records,
            settings,
            held,
        };
        (store, warnings)
    }

    /// 読み込み時に警告が出て、まだ書き戻していないキーか
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    pub fn save_entries(&mut self) -> Result<(), Error> {
        let json = to_json(ENTRIES_KEY, &self.entries)?;
        self.save(ENTRIES_KEY, &json)
    }

    pub fn save_records(&mut self) -> Result<(), Error> {
        let json = to_json(RECORDS_KEY, &self.records)?;
        self.save(RECORDS_KEY, &json)
    }

    pub fn save_settings(&mut self) -> Result<(), Error> {
        let json = to_json(SETTINGS_KEY, &self.settings)?;
        self.save(SETTINGS_KEY, &json)
    }

    fn save(&mut self, key: &str, json: &str) -> Result<(), Error> {
        self.kv.set(key, json)?;
        self.held.remove(key);
        Ok(())
    }
}

fn to_json<T: Serialize>(key: &str, value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::storage_write(key, e.to_string()))
}

struct Loader<'a> {
    kv: &'a dyn KeyValueStore,
    warnings: Vec<Error>,
    held: BTreeSet<&'static str>,
}

impl Loader<'_> {
    fn warn(&mut self, key: &'static str, err: Error) {
        self.warnings.push(err);
        self.held.insert(key);
    }

    fn read_raw(&mut self, key: &'static str) -> Option<String> {
        match self.kv.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                self.warn(key, e);
                None
            }
        }
    }

    fn load_or_default<T>(&mut self, key: &'static str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.read_raw(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                self.warn(key, Error::storage_read(key, e.to_string()));
                T::default()
            }
        }
    }

    fn load_records(&mut self) -> RecordBook {
        let Some(raw) = self.read_raw(RECORDS_KEY) else {
            return RecordBook::default();
        };
        match RecordBook::from_stored_json(&raw) {
            Ok((book, skipped)) => {
                for reason in skipped {
                    self.warn(
                        RECORDS_KEY,
                        Error::validation(format!("Skipped unreadable stored {}", reason)),
                    );
                }
                book
            }
            Err(e) => {
                self.warn(RECORDS_KEY, Error::storage_read(RECORDS_KEY, e.to_string()));
                RecordBook::default()
            }
        }
    }
}
