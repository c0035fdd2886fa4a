//! # diac
//!
//! Ahead-of-time compiler for dependency-injection binding graphs.
//!
//! A module's bindings are resolved once by an interpreted injector, then
//! every binding is compiled into a unit of straight-line instantiation code.
//! Units and a versioned snapshot of the module are persisted to a cache
//! directory; later processes run the units through a
//! [`ScriptInjector`](application::ScriptInjector) without re-reading the
//! module, compiling missing units on demand.
//!
//! ## Example
//!
//! ```ignore
//! use diac::infrastructure::{config::ConfigLoader, init_app};
//! use diac::DependencyKey;
//!
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let compiler = context.compiler(&AppModule, Arc::new(classes))?;
//! let car = compiler.get_instance(&DependencyKey::new("app::Car"))?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, bindings, compiled units, snapshot, ports, errors
//! - `application` - compilation engine, binder, registry, injectors
//! - `infrastructure` - configuration, logging, file artifact store
//! - `cli` - the `diac` command

pub mod cli;

/// Domain layer - keys, bindings, units and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use diac_domain::*;
}

/// Application layer - compilation engine and injectors
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use diac_application::*;
}

/// Infrastructure layer - config, logging and storage
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use diac_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the entry points at the crate root
pub use application::{Binder, ClassDefinition, ClassRegistry, DiCompiler, Module, Param};
pub use infrastructure::{AppContext, FileArtifactStore, init_app};
