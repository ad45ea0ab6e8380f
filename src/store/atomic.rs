//! Locked, atomic file replacement
//!
//! The lock lives in a sibling `<file>.lock` so that renaming the data file
//! never invalidates it. New content is written to `<file>.tmp`, synced and
//! renamed over the target.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Exclusive lock on a file, released when dropped
#[derive(Debug)]
pub(crate) struct FileLock {
    _file: File,
}

/// Block until this process holds the exclusive lock for `path`
pub(crate) fn lock_exclusive(path: &Path) -> io::Result<FileLock> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(sibling(path, "lock"))?;
    file.lock_exclusive()?;
    Ok(FileLock { _file: file })
}

/// Replace `path` with `content` via temp file + rename
pub(crate) fn replace_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;

    temp_file.write_all(content)?;
    temp_file.sync_all()?;
    std::fs::rename(&temp_path, path)
}

/// `state.json` -> `state.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
