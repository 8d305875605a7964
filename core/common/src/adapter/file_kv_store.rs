//! キーごとに JSON ファイルを持つ KeyValueStore 実装
//!
//! `<dir>/<key>.json` に値をそのまま書く。書き込みは `<key>.json.tmp` に出してから rename する。

use crate::error::Error;
use crate::ports::outbound::kv_store::is_valid_key;
use crate::ports::outbound::{FileSystem, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        if !is_valid_key(key) {
            return Err(Error::validation(format!("Invalid storage key: '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        self.fs
            .read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::storage_read(key, e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let write = || -> Result<(), Error> {
            self.fs.create_dir_all(&self.dir)?;
            self.fs.write(&tmp, value)?;
            self.fs.rename(&tmp, &path)
        };
        write().map_err(|e| Error::storage_write(key, e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        if !self.fs.exists(&path) {
            return Ok(());
        }
        self.fs
            .remove_file(&path)
            .map_err(|e| Error::storage_write(key, e.to_string()))
    }
}
