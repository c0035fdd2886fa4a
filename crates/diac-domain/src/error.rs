//! Error handling types

use crate::value_objects::{DependencyKey, InjectionPoint};
use std::fmt;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for diac
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// An argument has no binding, no runtime resolution path and no default
    #[error("Unbound dependency: {key}{}", display_point(.injection_point))]
    Unbound {
        /// The dependency key that could not be satisfied
        key: DependencyKey,
        /// Where the dependency was requested, when known
        injection_point: Option<InjectionPoint>,
    },

    /// One or more bindings failed to compile during a driver pass
    #[error("Compilation failed for {} binding(s): {}", .failures.len(), display_failures(.failures))]
    Compilation {
        /// Every binding that failed, with its cause
        failures: Vec<UnitFailure>,
    },

    /// Artifact storage error (unit or module snapshot)
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A persisted artifact was written by an incompatible format version
    #[error("Unsupported {artifact} format version {found} (expected {expected})")]
    FormatVersion {
        /// Kind of artifact (unit, module snapshot)
        artifact: String,
        /// Version this build understands
        expected: u32,
        /// Version found in the artifact
        found: u32,
    },

    /// A class is not known to the introspector or class registry
    #[error("Unknown class: {class}")]
    UnknownClass {
        /// The class name
        class: String,
    },

    /// Constructing or configuring an instance failed at runtime
    #[error("Instantiation error for {class}: {message}")]
    Instantiation {
        /// The class being instantiated
        class: String,
        /// Description of the failure
        message: String,
    },

    /// A dependency was requested again while it was being resolved
    #[error("Circular dependency: {}", display_path(.path))]
    CircularDependency {
        /// Keys from the outermost request to the repeated one
        path: Vec<DependencyKey>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic string-based error
    #[error("String error: {0}")]
    String(String),
}

/// A binding that failed during a compilation pass
#[derive(Debug)]
pub struct UnitFailure {
    /// Key of the binding that failed
    pub key: DependencyKey,
    /// Why it failed
    pub error: Error,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.error)
    }
}

fn display_point(point: &Option<InjectionPoint>) -> String {
    point
        .as_ref()
        .map(|p| format!(" (required by {p})"))
        .unwrap_or_default()
}

fn display_path(path: &[DependencyKey]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn display_failures(failures: &[UnitFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Compilation error creation methods
impl Error {
    /// Create an unbound dependency error
    pub fn unbound(key: DependencyKey, injection_point: Option<InjectionPoint>) -> Self {
        Self::Unbound {
            key,
            injection_point,
        }
    }

    /// Whether this error is an unbound dependency
    pub fn is_unbound(&self) -> bool {
        matches!(self, Self::Unbound { .. })
    }

    /// Create an unknown class error
    pub fn unknown_class<S: Into<String>>(class: S) -> Self {
        Self::UnknownClass {
            class: class.into(),
        }
    }

    /// Create an instantiation error
    pub fn instantiation<C: Into<String>, S: Into<String>>(class: C, message: S) -> Self {
        Self::Instantiation {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular(path: Vec<DependencyKey>) -> Self {
        Self::CircularDependency { path }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// Storage and I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with source
    pub fn storage_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a format version mismatch error
    pub fn format_version<S: Into<String>>(artifact: S, expected: u32, found: u32) -> Self {
        Self::FormatVersion {
            artifact: artifact.into(),
            expected,
            found,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error (simple)
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Internal and infrastructure error creation methods
impl Error {
    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
