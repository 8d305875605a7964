//! エラーハンドリング
//!
//! 永続ストアの読み書き失敗・存在しない ID・入力検証の失敗を区別して扱う。
//! いずれも発生箇所で回復できるよう、呼び出し側が種別で分岐できる形にしている。

/// pillrem 全体で使うエラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 永続データが読めない・壊れている（空のストアで続行する）
    #[error("Failed to read stored '{key}': {message}")]
    StorageRead { key: String, message: String },

    /// 永続データを書き込めない（メモリ上の状態を正として続行する）
    #[error("Failed to save '{key}': {message}")]
    StorageWrite { key: String, message: String },

    /// 指定 ID のエントリ・レコードが存在しない
    #[error("{0}")]
    NotFound(String),

    /// 入力値の検証エラー（該当フィールドのみ拒否する）
    #[error("{0}")]
    Validation(String),

    /// コマンドライン引数の誤り
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// 環境変数が解決できない
    #[error("{0}")]
    Env(String),

    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn storage_read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::StorageRead {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn storage_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::StorageWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// 使い方の誤り（usage を表示すべきエラー）か
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Validation(_) | Error::Json(_) | Error::StorageRead { .. } => 65,
            Error::NotFound(_) => 66,
            Error::Env(_) => 78,
            Error::System(_) => 70,
            Error::Io(_) | Error::StorageWrite { .. } => 74,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
