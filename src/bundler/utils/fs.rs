//! File system helpers for the build pipeline.
//!
//! Path handling is forward-slash normalized at the edges; directory
//! creation is idempotent; copies overwrite their destination.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::bundler::error::{Error, Result};

/// Converts backslash separators to forward slashes.
///
/// Applied once to every incoming path string during parameter resolution.
pub fn normalize_path(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Returns true when `path` is a directory whose entries can be listed.
pub fn is_readable_dir(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok()
}

/// Ensures `path` exists as a writeable directory, creating it if absent.
pub fn ensure_writable_dir(path: &Path) -> bool {
    if !path.exists() && std::fs::create_dir_all(path).is_err() {
        return false;
    }
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
        Err(_) => false,
    }
}

/// Creates `subdirs` under `dir` (idempotent) and returns the joined path
/// with `name` appended. An empty `name` yields the directory itself.
pub async fn make_path(dir: &Path, subdirs: &[&str], name: &str) -> Result<PathBuf> {
    let mut path = dir.to_path_buf();
    for sub in subdirs {
        path.push(sub);
    }
    fs::create_dir_all(&path).await.map_err(|source| Error::CreateDir {
        path: path.clone(),
        source,
    })?;
    if name.is_empty() {
        Ok(path)
    } else {
        Ok(path.join(name))
    }
}

/// Copies `from` over `to`, removing any pre-existing destination first.
pub async fn copy_file_force(from: &Path, to: &Path) -> Result<()> {
    match fs::remove_file(to).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::copy(from, to).await?;
    Ok(())
}
