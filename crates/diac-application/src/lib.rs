//! Application Layer - diac
//!
//! The compilation engine for dependency-injection binding graphs, plus the
//! collaborators it is driven by.
//!
//! ## Architecture
//!
//! ```text
//! DiCompiler::get_instance(key)
//!   ├─ InterpretedInjector::get_instance   (phase 1: resolve, discover bindings)
//!   └─ CompilationDriver::compile_all      (phase 2: compile everything now known)
//!        └─ UnitCompiler::compile          (per binding)
//!             ├─ ArgumentResolver          (per argument)
//!             └─ OnDemandCompiler          (argument not in the table)
//! ```
//!
//! ## Modules
//!
//! - [`compiler`]: argument resolution, unit compilation, driver, two-phase entry point
//! - [`runtime`]: interpreted injector and the script injector that runs compiled units
//! - [`binder`]: module DSL that produces the binding table
//! - [`registry`]: class registry (structure + typed factories)
//!
//! ## Dependencies
//!
//! This crate depends only on `diac-domain`; storage comes in through the
//! `ArtifactStore` port.

pub mod binder;
pub mod compiler;
pub mod registry;
pub mod runtime;

pub use binder::{Binder, BindingBuilder, Module};
pub use compiler::{
    ArgumentResolver, CompilationDriver, CompileReport, DiCompiler, OnDemandCompiler, UnitCompiler,
};
pub use registry::{ClassDefinition, ClassRegistry, Param};
pub use runtime::{InterpretedInjector, ScriptInjector};
