//! File-backed artifact store
//!
//! Layout of the cache directory:
//!
//! ```text
//! <cache>/<token>.json        one compiled unit per dependency key
//! <cache>/<token>.json.lock   its write lock
//! <cache>/_module.json        module snapshot
//! ```

use super::lock::write_exclusive;
use crate::config::CompilerConfig;
use crate::constants::{MODULE_SNAPSHOT_FILENAME, UNIT_EXTENSION};
use crate::error_ext::ErrorContext;
use diac_domain::error::{Error, Result};
use diac_domain::ports::ArtifactStore;
use diac_domain::{CompiledUnit, DependencyKey, ModuleSnapshot};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Artifact store writing JSON files into one cache directory
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
    pretty: bool,
}

impl FileArtifactStore {
    /// Store rooted at `root`; the directory is created on first write
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    /// Store described by the compiler configuration
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new(&config.cache_dir).with_pretty(config.pretty_units)
    }

    /// Choose between indented and compact JSON
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Cache directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the unit for `key`
    pub fn unit_path(&self, key: &DependencyKey) -> PathBuf {
        self.root
            .join(format!("{}.{UNIT_EXTENSION}", key.token()))
    }

    /// Path of the module snapshot
    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(MODULE_SNAPSHOT_FILENAME)
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        encoded.storage_context("Failed to serialize artifact")
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::storage_with_source(
                    format!("Failed to read {}", path.display()),
                    e,
                ));
            }
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .storage_context(format!("Corrupt artifact {}", path.display()))
    }

    fn is_unit_file(path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(UNIT_EXTENSION)
            && path.file_name().and_then(|name| name.to_str()) != Some(MODULE_SNAPSHOT_FILENAME)
    }
}

impl ArtifactStore for FileArtifactStore {
    fn unit_exists(&self, key: &DependencyKey) -> bool {
        self.unit_path(key).is_file()
    }

    fn write_unit(&self, unit: &CompiledUnit) -> Result<()> {
        let path = self.unit_path(&unit.key);
        write_exclusive(&path, &self.encode(unit)?)?;
        debug!(key = %unit.key, path = %path.display(), "Wrote unit");
        Ok(())
    }

    fn read_unit(&self, key: &DependencyKey) -> Result<Option<CompiledUnit>> {
        let path = self.unit_path(key);
        let Some(unit) = Self::read_json::<CompiledUnit>(&path)? else {
            return Ok(None);
        };
        if unit.key != *key {
            return Err(Error::storage(format!(
                "{} holds the unit of {}, not {key}",
                path.display(),
                unit.key
            )));
        }
        Ok(Some(unit))
    }

    fn write_snapshot(&self, snapshot: &ModuleSnapshot) -> Result<()> {
        let path = self.snapshot_path();
        write_exclusive(&path, &self.encode(snapshot)?)?;
        debug!(bindings = snapshot.len(), path = %path.display(), "Wrote module snapshot");
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Option<ModuleSnapshot>> {
        Self::read_json(&self.snapshot_path())
    }

    fn list_units(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut tokens = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.storage_context(format!("Failed to list {}", self.root.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && Self::is_unit_file(path) {
                if let Some(token) = path.file_stem().and_then(|stem| stem.to_str()) {
                    tokens.push(token.to_string());
                }
            }
        }
        tokens.sort();
        Ok(tokens)
    }
}
