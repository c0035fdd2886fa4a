//! Class factory ports
//!
//! Runtimes construct objects through factories registered per class name.

use super::injector::Injector;
use super::introspector::StructuralIntrospector;
use crate::error::Result;
use crate::value_objects::{Arguments, InjectionPoint, Value};
use std::any::Any;
use std::sync::Arc;

/// An object under construction, before it is shared
pub type Object = Box<dyn Any + Send + Sync>;

/// What a provider is told when asked for a value
pub struct ProvisionContext<'a> {
    /// Injector the provider may request further dependencies from
    pub injector: &'a dyn Injector,
    /// Where the provided value will be injected, when known
    pub injection_point: Option<&'a InjectionPoint>,
    /// Context string from the binding
    pub context: Option<&'a str>,
}

/// Constructs and configures instances of one class
pub trait ClassFactory: Send + Sync {
    /// Call the constructor
    fn construct(&self, arguments: Arguments) -> Result<Object>;

    /// Call a setter or post-construct method
    fn invoke(&self, target: &mut (dyn Any + Send + Sync), method: &str, arguments: Arguments)
    -> Result<()>;

    /// Ask a provider instance for its value
    fn provide(&self, provider: &(dyn Any + Send + Sync), context: &ProvisionContext<'_>)
    -> Result<Value>;
}

/// Looks up class factories and class structure
pub trait ClassLoader: Send + Sync {
    /// Factory for `class`
    fn factory(&self, class: &str) -> Option<Arc<dyn ClassFactory>>;

    /// Structural view of the same classes
    fn introspector(&self) -> &dyn StructuralIntrospector;
}
