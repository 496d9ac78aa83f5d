use std::path::PathBuf;

use thiserror::Error;

use cs_core::app_dirs::AppDirs;

const APP_DIR_NAME: &str = "clipshelf";
const PROFILE_ENV: &str = "CLIPSHELF_PROFILE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppDirsError {
    #[error("system local data directory is unavailable")]
    DataLocalDirUnavailable,
}

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves the application-support directory through `dirs`.
///
/// `CLIPSHELF_PROFILE=<name>` isolates a profile under `clipshelf-<name>`.
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Use `base` instead of the system local data directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }

    pub fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(resolved_app_dir_name()),
        })
    }
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}
