//! Compiler configuration types

use crate::constants::DEFAULT_CACHE_DIR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how compiled artifacts are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Directory holding compiled units and the module snapshot
    pub cache_dir: PathBuf,

    /// Write artifacts as indented JSON
    pub pretty_units: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            pretty_units: true,
        }
    }
}
