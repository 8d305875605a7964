//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "pillrem";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty_var(name: &str) -> Option<PathBuf> {
    env::var(name).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

impl EnvResolver for StdEnvResolver {
    fn home_dir_from_env(&self) -> Option<HomeDir> {
        non_empty_var("PILLREM_HOME").map(HomeDir::new)
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if let Some(home) = self.home_dir_from_env() {
            return Ok(dirs_under_home(&home));
        }

        let home = non_empty_var("HOME");
        let data_base = non_empty_var("XDG_DATA_HOME")
            .or_else(|| home.as_ref().map(|h| h.join(".local/share")))
            .ok_or_else(|| Error::env("HOME is not set"))?;
        let state_base = non_empty_var("XDG_STATE_HOME")
            .or_else(|| home.as_ref().map(|h| h.join(".local/state")))
            .ok_or_else(|| Error::env("HOME is not set"))?;

        Ok(Dirs {
            data_dir: data_base.join(APP_DIR),
            state_dir: state_base.join(APP_DIR),
        })
    }
}

/// PILLREM_HOME（または -d/--home-dir）配下の data / state
pub fn dirs_under_home(home: &HomeDir) -> Dirs {
    Dirs {
        data_dir: home.join("data"),
        state_dir: home.join("state"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_under_home() {
        let dirs = dirs_under_home(&HomeDir::new("/tmp/pillrem_home"));
        assert_eq!(dirs.data_dir, PathBuf::from("/tmp/pillrem_home/data"));
        assert_eq!(dirs.state_dir, PathBuf::from("/tmp/pillrem_home/state"));
    }
}
