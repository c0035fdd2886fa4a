//! Artifact storage port
//!
//! Compiled units are addressed 1:1 by dependency key; the module snapshot
//! lives at one fixed address.

use crate::entities::{CompiledUnit, ModuleSnapshot};
use crate::error::Result;
use crate::value_objects::DependencyKey;

/// Persistent store for compiled units and the module snapshot
pub trait ArtifactStore: Send + Sync {
    /// Whether a unit exists for `key`
    fn unit_exists(&self, key: &DependencyKey) -> bool;

    /// Persist a unit without ever exposing a partially written artifact
    fn write_unit(&self, unit: &CompiledUnit) -> Result<()>;

    /// Load the unit for `key`, if present
    fn read_unit(&self, key: &DependencyKey) -> Result<Option<CompiledUnit>>;

    /// Persist the module snapshot, replacing any previous one
    fn write_snapshot(&self, snapshot: &ModuleSnapshot) -> Result<()>;

    /// Load the module snapshot, if present
    fn read_snapshot(&self) -> Result<Option<ModuleSnapshot>>;

    /// Tokens of every stored unit, sorted
    fn list_units(&self) -> Result<Vec<String>>;
}
