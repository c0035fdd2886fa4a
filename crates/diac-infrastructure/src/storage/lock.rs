//! Exclusive artifact writes
//!
//! Several processes may compile into one cache directory. Each write holds
//! an `fs2` exclusive lock on `<artifact>.lock`, writes a uniquely named
//! temporary file next to the artifact and renames it into place, so readers
//! see either the previous artifact or the complete new one.

use crate::constants::{LOCK_SUFFIX, TEMP_PREFIX};
use crate::error_ext::ErrorContext;
use diac_domain::error::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exclusive lock on one artifact, released on drop
pub struct ArtifactLock {
    file: File,
    path: PathBuf,
}

impl ArtifactLock {
    /// Block until the lock for `artifact` is held
    pub fn acquire(artifact: &Path) -> Result<Self> {
        let path = lock_path(artifact);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .storage_context(format!("Failed to open lock file {}", path.display()))?;
        file.lock_exclusive()
            .storage_context(format!("Failed to lock {}", path.display()))?;
        Ok(Self { file, path })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Lock file guarding `artifact`
pub fn lock_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_os_string();
    name.push(LOCK_SUFFIX);
    PathBuf::from(name)
}

/// Replace `artifact` with `contents` under its exclusive lock
pub fn write_exclusive(artifact: &Path, contents: &[u8]) -> Result<()> {
    let dir = artifact
        .parent()
        .ok_or_else(|| Error::storage(format!("{} has no parent directory", artifact.display())))?;
    fs::create_dir_all(dir)
        .storage_context(format!("Failed to create cache directory {}", dir.display()))?;

    let _lock = ArtifactLock::acquire(artifact)?;
    let temp = dir.join(format!("{TEMP_PREFIX}{}", uuid::Uuid::new_v4()));

    let written = (|| -> std::io::Result<()> {
        let mut file = File::create(&temp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&temp, artifact)
    })();
    if written.is_err() {
        let _ = fs::remove_file(&temp);
    }
    written.storage_context(format!("Failed to write {}", artifact.display()))
}
