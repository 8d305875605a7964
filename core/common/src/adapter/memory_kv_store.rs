//! プロセス内メモリの KeyValueStore 実装（テスト用）
//!
//! `fail_writes(true)` で書き込みを失敗させ、容量超過・ストレージ無効を再現できる。

use crate::error::Error;
use crate::ports::outbound::KeyValueStore;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作る
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut map) = store.values.lock() {
            for (k, v) in values {
                map.insert(k.into(), v.into());
            }
        }
        store
    }

    /// 以後の set / remove を失敗させる（true）か戻す（false）
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 現在の値（書き込み失敗の影響を確認するため）
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|m| m.get(key).cloned())
    }

    fn check_writable(&self, key: &str) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::storage_write(key, "storage quota exceeded"));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let map = self
            .values
            .lock()
            .map_err(|_| Error::storage_read(key, "store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.check_writable(key)?;
        let mut map = self
            .values
            .lock()
            .map_err(|_| Error::storage_write(key, "store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.check_writable(key)?;
        let mut map = self
            .values
            .lock()
            .map_err(|_| Error::storage_write(key, "store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}
