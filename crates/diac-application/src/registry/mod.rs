//! Class registry

pub mod class_registry;

pub use class_registry::{CONSTRUCTOR_METHOD, ClassDefinition, ClassRegistry, Param};
