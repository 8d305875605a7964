//! ドメイン型（Newtype）
//!
//! PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod dirs;

use std::path::{Path, PathBuf};

pub use dirs::Dirs;

/// ホームディレクトリのパス（-d/--home-dir または PILLREM_HOME）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}
