//! Injector ports

use crate::error::Result;
use crate::value_objects::{DependencyKey, InjectionPoint, Scope, Value};
use std::fmt;
use thiserror::Error;

/// Resolves dependency keys to values
pub trait Injector: Send + Sync {
    /// Resolve `key` without call-site information
    fn get_instance(&self, key: &DependencyKey) -> Result<Value> {
        self.get_instance_at(key, None)
    }

    /// Resolve `key` on behalf of `injection_point`
    fn get_instance_at(
        &self,
        key: &DependencyKey,
        injection_point: Option<&InjectionPoint>,
    ) -> Result<Value>;
}

/// The key has no compiled unit yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dependency has not been compiled")]
pub struct NotCompiled;

/// Scope lookup offered by injectors that run compiled units
pub trait ScopeQuery: Send + Sync {
    /// Scope of the compiled unit for `key`
    fn scope_of(&self, key: &DependencyKey) -> std::result::Result<Scope, NotCompiled>;
}

/// What the compiler may ask of the injector it runs under
#[derive(Clone, Copy)]
pub enum InjectorCapability<'a> {
    /// Plain interpreted resolution; no compiled units to defer to
    Interpreted,
    /// A runtime that executes compiled units and can report their scope
    Compiling(&'a dyn ScopeQuery),
}

impl fmt::Debug for InjectorCapability<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interpreted => f.write_str("Interpreted"),
            Self::Compiling(_) => f.write_str("Compiling(..)"),
        }
    }
}
