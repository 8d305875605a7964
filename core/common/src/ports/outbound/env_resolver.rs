//! 環境変数解決 Outbound ポート
//!
//! データ・状態ディレクトリを環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver`。
pub trait EnvResolver: Send + Sync {
    /// PILLREM_HOME が設定されていれば返す
    fn home_dir_from_env(&self) -> Option<HomeDir>;

    /// data / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. PILLREM_HOME（data = $PILLREM_HOME/data, state = $PILLREM_HOME/state）
    /// 2. $XDG_DATA_HOME/pillrem, $XDG_STATE_HOME/pillrem
    /// 3. $HOME/.local/share/pillrem, $HOME/.local/state/pillrem
    fn resolve_dirs(&self) -> Result<Dirs, Error>;
}
