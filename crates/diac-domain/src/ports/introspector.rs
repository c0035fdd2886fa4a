//! Structural introspection port
//!
//! The compiler never reads descriptor internals directly; it asks this
//! capability for the ordered argument lists, setters and post-construct
//! hooks of a recipe, and for the signature of classes it has to bind
//! just in time.

use crate::entities::{Argument, ClassSignature, Dependency, SetterMethod};

/// Read capability over class structure
pub trait StructuralIntrospector: Send + Sync {
    /// Signature of `class`, if the class is known
    fn signature_of(&self, class: &str) -> Option<ClassSignature>;

    /// Ordered constructor arguments of a recipe
    fn constructor_of<'a>(&self, dependency: &'a Dependency) -> &'a [Argument] {
        &dependency.constructor
    }

    /// Setter methods of a recipe, in declaration order
    fn setters_of<'a>(&self, dependency: &'a Dependency) -> &'a [SetterMethod] {
        &dependency.setters
    }

    /// Ordered arguments of a setter
    fn arguments_of<'a>(&self, setter: &'a SetterMethod) -> &'a [Argument] {
        &setter.arguments
    }

    /// Whether a setter may be dropped when unsatisfiable
    fn is_optional(&self, setter: &SetterMethod) -> bool {
        setter.optional
    }

    /// Post-construct hook of a recipe
    fn post_construct_of<'a>(&self, dependency: &'a Dependency) -> Option<&'a str> {
        dependency.post_construct.as_deref()
    }
}

/// Introspector that only knows what the descriptors themselves carry
///
/// Used when compiling from a module snapshot, where no class metadata
/// is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorIntrospector;

impl StructuralIntrospector for DescriptorIntrospector {
    fn signature_of(&self, _class: &str) -> Option<ClassSignature> {
        None
    }
}
