//! Module snapshot
//!
//! Explicit, versioned serialization of a whole binding configuration. A later
//! process rebuilds the [`BindingTable`] from it without running module code.

use super::binding::Binding;
use super::binding_table::BindingTable;
use crate::constants::SNAPSHOT_FORMAT_VERSION;
use crate::error::{Error, Result};
use crate::value_objects::DependencyKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One binding of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Bound key
    pub key: DependencyKey,
    /// Binding recipe
    pub binding: Binding,
}

/// Serialized binding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
    /// Bindings in key order
    pub bindings: Vec<SnapshotEntry>,
}

impl ModuleSnapshot {
    /// Snapshot every binding of `table`
    pub fn from_table(table: &BindingTable) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            generated_at: Utc::now(),
            bindings: table
                .iter()
                .map(|(key, binding)| SnapshotEntry {
                    key: key.clone(),
                    binding: binding.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild the binding table
    ///
    /// Fails when the snapshot was written by another format version.
    pub fn into_table(self) -> Result<BindingTable> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::format_version(
                "module snapshot",
                SNAPSHOT_FORMAT_VERSION,
                self.format_version,
            ));
        }
        Ok(self
            .bindings
            .into_iter()
            .map(|entry| (entry.key, entry.binding))
            .collect())
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the snapshot holds no binding
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
