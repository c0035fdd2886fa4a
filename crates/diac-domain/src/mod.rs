//! # Domain Layer
//!
//! Core types of the diac ahead-of-time compiler for dependency-injection
//! binding graphs.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Dependency keys, scopes, injection points, runtime values |
//! | [`entities`] | Binding descriptors, the binding table, compiled units, module snapshots |
//! | [`ports`] | Capabilities the compiler consumes (introspection, injectors, storage, factories) |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Format versions and naming constants |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::*;
pub use error::{Error, Result, UnitFailure};
pub use value_objects::*;
