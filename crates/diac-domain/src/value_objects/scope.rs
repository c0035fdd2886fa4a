//! Instantiation scopes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many instances a binding produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One instance, reused for every resolution
    Singleton,
    /// A new instance per resolution
    #[default]
    Prototype,
}

impl Scope {
    /// Accessor name used by generated call sites
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
