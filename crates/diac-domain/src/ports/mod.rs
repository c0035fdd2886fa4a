//! Ports
//!
//! Capabilities the compilation engine and runtimes consume. Implementations
//! live in the application and infrastructure crates.

pub mod class_factory;
pub mod injector;
pub mod introspector;
pub mod storage;

pub use class_factory::{ClassFactory, ClassLoader, Object, ProvisionContext};
pub use injector::{Injector, InjectorCapability, NotCompiled, ScopeQuery};
pub use introspector::{DescriptorIntrospector, StructuralIntrospector};
pub use storage::ArtifactStore;
