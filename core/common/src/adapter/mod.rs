//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみファイル・時刻・KV ストア・ログに触れる。
//! 実装は標準実装（Std* / File*）やテスト用の Memory* / Fixed* / Noop* を注入する。

pub mod file_json_log;
pub mod file_kv_store;
pub mod memory_kv_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::MemoryKeyValueStore;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::{dirs_under_home, StdEnvResolver};
pub use std_fs::StdFileSystem;
