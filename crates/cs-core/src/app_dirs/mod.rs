use std::path::PathBuf;

/// Resolved application directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn config_path(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.app_data_root.join("history")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/clipshelf"),
        };
        assert_eq!(dirs.config_path(), PathBuf::from("/tmp/clipshelf/config.toml"));
        assert!(dirs.history_dir().starts_with(&dirs.app_data_root));
    }
}
