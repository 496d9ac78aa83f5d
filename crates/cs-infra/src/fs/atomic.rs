use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to a sibling temp file, fsync it, then rename over `path`.
///
/// Readers observe either the previous content or the new content, never a partial file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp)
        .await
        .with_context(|| format!("create temp file {}", tmp.display()))?;
    file.write_all(bytes)
        .await
        .with_context(|| format!("write temp file {}", tmp.display()))?;
    file.sync_all()
        .await
        .with_context(|| format!("sync temp file {}", tmp.display()))?;
    drop(file);

    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("rename {} to {}", tmp.display(), path.display()))?;
    Ok(())
}
