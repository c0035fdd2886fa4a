//! Binding descriptors
//!
//! A binding maps a [`DependencyKey`] to a construction recipe. Descriptors are
//! immutable once produced by the binder.

use crate::value_objects::{DependencyKey, InjectionPoint, Scope};
use serde::{Deserialize, Serialize};

/// One formal parameter of a constructor or setter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Binding that satisfies this parameter
    pub key: DependencyKey,
    /// Whether the parameter declares a default
    #[serde(default)]
    pub has_default: bool,
    /// The default literal, meaningful only when `has_default` is set
    #[serde(default)]
    pub default_value: serde_json::Value,
    /// Where the parameter is declared
    pub injection_point: InjectionPoint,
}

impl Argument {
    /// Argument without a default
    pub fn new(key: DependencyKey, injection_point: InjectionPoint) -> Self {
        Self {
            key,
            has_default: false,
            default_value: serde_json::Value::Null,
            injection_point,
        }
    }

    /// Attach a default literal
    #[must_use]
    pub fn with_default<V: Into<serde_json::Value>>(mut self, value: V) -> Self {
        self.has_default = true;
        self.default_value = value.into();
        self
    }

    /// The default literal, if one is declared
    pub fn default(&self) -> Option<&serde_json::Value> {
        self.has_default.then_some(&self.default_value)
    }
}

/// A setter-injection method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetterMethod {
    /// Method name
    pub method: String,
    /// Ordered arguments
    pub arguments: Vec<Argument>,
    /// Optional setters are skipped when any argument is unbound
    #[serde(default)]
    pub optional: bool,
}

impl SetterMethod {
    /// Create a required setter
    pub fn new<S: Into<String>>(method: S, arguments: Vec<Argument>) -> Self {
        Self {
            method: method.into(),
            arguments,
            optional: false,
        }
    }

    /// Mark the setter optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Structural description of a class: what the reflection capability reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSignature {
    /// Concrete class name
    pub class: String,
    /// Ordered constructor arguments
    #[serde(default)]
    pub constructor: Vec<Argument>,
    /// Setter methods in declaration order
    #[serde(default)]
    pub setters: Vec<SetterMethod>,
    /// Post-construct hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_construct: Option<String>,
}

impl ClassSignature {
    /// Signature of a class with a no-argument constructor
    pub fn new<S: Into<String>>(class: S) -> Self {
        Self {
            class: class.into(),
            constructor: Vec::new(),
            setters: Vec::new(),
            post_construct: None,
        }
    }
}

/// Recipe for constructing one class instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Concrete class to construct
    pub class: String,
    /// Instantiation scope
    pub scope: Scope,
    /// Ordered constructor arguments
    #[serde(default)]
    pub constructor: Vec<Argument>,
    /// Setter methods in declaration order
    #[serde(default)]
    pub setters: Vec<SetterMethod>,
    /// Post-construct hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_construct: Option<String>,
}

impl Dependency {
    /// Build a recipe from a class signature
    pub fn from_signature(signature: ClassSignature, scope: Scope) -> Self {
        Self {
            class: signature.class,
            scope,
            constructor: signature.constructor,
            setters: signature.setters,
            post_construct: signature.post_construct,
        }
    }
}

/// A configured binding, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    /// Construct a class
    Dependency(Dependency),
    /// A literal bound directly
    Instance {
        /// The bound value
        value: serde_json::Value,
    },
    /// Construct a provider class and ask it for the value
    Provider {
        /// How to construct the provider
        provider: Dependency,
        /// Scope of the provided value
        scope: Scope,
        /// Context string handed to the provider
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
}

impl Binding {
    /// Scope applied at every call site referencing this binding
    pub fn scope(&self) -> Scope {
        match self {
            Self::Dependency(dependency) => dependency.scope,
            Self::Instance { .. } => Scope::Singleton,
            Self::Provider { scope, .. } => *scope,
        }
    }

    /// Short description for logs and diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Dependency(dependency) => format!("class {}", dependency.class),
            Self::Instance { value } => format!("instance {value}"),
            Self::Provider { provider, .. } => format!("provider {}", provider.class),
        }
    }
}
