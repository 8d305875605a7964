//! 読み書きを構造化ログに記録する KeyValueStore のラッパ

use common::error::Error;
use common::ports::outbound::{KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct LoggingKeyValueStore {
    inner: Arc<dyn KeyValueStore>,
    log: Arc<dyn Log>,
}

impl LoggingKeyValueStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, log: Arc<dyn Log>) -> Self {
        Self { inner, log }
    }

    fn record(&self, level: LogLevel, message: &str, key: &str, extra: Option<(&str, serde_json::Value)>) {
        let mut rec = LogRecord::new(level, "adapter", "storage", message).field("key", key);
        if let Some((k, v)) = extra {
            rec = rec.field(k, v);
        }
        let _ = self.log.log(&rec);
    }
}

impl KeyValueStore for LoggingKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self.inner.get(key) {
            Ok(value) => {
                let bytes = value.as_ref().map(String::len).unwrap_or(0);
                self.record(LogLevel::Debug, "storage read", key, Some(("bytes", bytes.into())));
                Ok(value)
            }
            Err(e) => {
                self.record(LogLevel::Warn, "storage read failed", key, Some(("error", e.to_string().into())));
                Err(e)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        match self.inner.set(key, value) {
            Ok(()) => {
                self.record(LogLevel::Info, "storage write", key, Some(("bytes", value.len().into())));
                Ok(())
            }
            Err(e) => {
                self.record(LogLevel::Error, "storage write failed", key, Some(("error", e.to_string().into())));
                Err(e)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        match self.inner.remove(key) {
            Ok(()) => {
                self.record(LogLevel::Info, "storage remove", key, None);
                Ok(())
            }
            Err(e) => {
                self.record(LogLevel::Error, "storage remove failed", key, Some(("error", e.to_string().into())));
                Err(e)
            }
        }
    }
}
