use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Remove a file or directory tree, treating a missing path as success.
///
/// Returns whether something was actually removed.
pub async fn remove_path(path: &Path) -> io::Result<bool> {
  let metadata = match fs::symlink_metadata(path).await {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
    Err(e) => return Err(e),
  };

  let result = if metadata.is_dir() {
    fs::remove_dir_all(path).await
  } else {
    fs::remove_file(path).await
  };

  match result {
    Ok(()) => Ok(true),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e),
  }
}

/// Make `path` absolute against the current directory.
///
/// Existing paths are canonicalized; paths that do not exist yet (a derived
/// data directory before the first build) are only made absolute.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
  match dunce::canonicalize(path) {
    Ok(resolved) => Ok(resolved),
    Err(e) if e.kind() == io::ErrorKind::NotFound => std::path::absolute(path),
    Err(e) => Err(e),
  }
}
