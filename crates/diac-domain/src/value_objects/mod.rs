//! Value objects

pub mod dependency_key;
pub mod injection_point;
pub mod scope;
pub mod value;

pub use dependency_key::DependencyKey;
pub use injection_point::InjectionPoint;
pub use scope::Scope;
pub use value::{Arguments, Instance, Value};
