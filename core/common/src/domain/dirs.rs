//! 実行時ディレクトリ（XDG / PILLREM_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、ストレージ・ログのパス計算に使う。

use std::path::PathBuf;

const STORAGE_SUBDIR: &str = "storage";
const LOGS_SUBDIR: &str = "logs";
const LOG_FILENAME: &str = "pillrem.jsonl";

/// 解決済みの data / state ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// キーごとの JSON ファイルを置くディレクトリ（data/storage）
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join(STORAGE_SUBDIR)
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join(LOGS_SUBDIR)
    }

    /// 構造化ログ（JSONL）のファイルパス
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILENAME)
    }
}
