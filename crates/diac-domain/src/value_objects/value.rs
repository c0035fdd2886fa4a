//! Runtime values produced by injectors

use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A constructed object, shared between its dependents
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Result of resolving a dependency: a literal or a constructed object
#[derive(Clone)]
pub enum Value {
    /// A literal (instance bindings, defaults)
    Literal(serde_json::Value),
    /// An object built by a class factory or provider
    Object(Instance),
}

impl Value {
    /// Wrap a literal
    pub fn literal<V: Into<serde_json::Value>>(value: V) -> Self {
        Self::Literal(value.into())
    }

    /// Wrap an object
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Self::Object(Arc::new(value))
    }

    /// The literal, if this is one
    pub fn as_literal(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Object(_) => None,
        }
    }

    /// The object downcast to `T`, if this is an object of that type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Object(instance) => instance.clone().downcast::<T>().ok(),
            Self::Literal(_) => None,
        }
    }

    /// Whether both values are the very same object
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => {
                std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Positional arguments handed to class factories
#[derive(Debug, Clone, Default)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    /// Wrap resolved values
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Argument at `index`
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.0.get(index).ok_or_else(|| {
            Error::invalid_argument(format!(
                "missing argument #{index} ({} provided)",
                self.0.len()
            ))
        })
    }

    /// Object argument at `index`, downcast to `T`
    pub fn object<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        self.get(index)?.downcast::<T>().ok_or_else(|| {
            Error::invalid_argument(format!(
                "argument #{index} is not an object of type {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Literal argument at `index`
    pub fn literal(&self, index: usize) -> Result<&serde_json::Value> {
        self.get(index)?
            .as_literal()
            .ok_or_else(|| Error::invalid_argument(format!("argument #{index} is not a literal")))
    }

    /// String literal argument at `index`
    pub fn str(&self, index: usize) -> Result<&str> {
        self.literal(index)?
            .as_str()
            .ok_or_else(|| Error::invalid_argument(format!("argument #{index} is not a string")))
    }

    /// Integer literal argument at `index`
    pub fn i64(&self, index: usize) -> Result<i64> {
        self.literal(index)?
            .as_i64()
            .ok_or_else(|| Error::invalid_argument(format!("argument #{index} is not an integer")))
    }

    /// Boolean literal argument at `index`
    pub fn bool(&self, index: usize) -> Result<bool> {
        self.literal(index)?
            .as_bool()
            .ok_or_else(|| Error::invalid_argument(format!("argument #{index} is not a boolean")))
    }

    /// Unwrap the values
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}
