//! Injection point (call-site metadata)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an injection happens: declaring type, method and parameter
///
/// Contextual providers receive this so they can tell which parameter
/// is being satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InjectionPoint {
    /// Type declaring the constructor or method
    pub declaring_type: String,
    /// Constructor or method name
    pub method: String,
    /// Parameter name
    pub parameter: String,
}

impl InjectionPoint {
    /// Create an injection point
    pub fn new<T, M, P>(declaring_type: T, method: M, parameter: P) -> Self
    where
        T: Into<String>,
        M: Into<String>,
        P: Into<String>,
    {
        Self {
            declaring_type: declaring_type.into(),
            method: method.into(),
            parameter: parameter.into(),
        }
    }
}

impl fmt::Display for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({})",
            self.declaring_type, self.method, self.parameter
        )
    }
}
