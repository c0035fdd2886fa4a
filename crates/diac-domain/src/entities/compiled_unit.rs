//! Compiled units
//!
//! A compiled unit is the generated instantiation code for one binding. It is
//! persisted as JSON and evaluated by the script injector; its `Display`
//! rendering is a readable pseudo-code listing of the same program.

use crate::constants::UNIT_FORMAT_VERSION;
use crate::error::{Error, Result};
use crate::value_objects::{DependencyKey, InjectionPoint, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How one argument is produced at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    /// Call the compiled unit of a binding known at compile time
    Reference {
        /// Scope accessor to use
        scope: Scope,
        /// Referenced binding
        key: DependencyKey,
    },
    /// Defer resolution to the runtime injector
    OnDemand {
        /// Scope accessor to use
        scope: Scope,
        /// Requested binding
        key: DependencyKey,
        /// Call site, for contextual providers
        injection_point: InjectionPoint,
    },
    /// Embedded default literal
    Literal {
        /// The literal
        value: serde_json::Value,
    },
}

impl Expr {
    /// Literal expression
    pub fn literal(value: serde_json::Value) -> Self {
        Self::Literal { value }
    }

    /// Key this expression resolves, if any
    pub fn key(&self) -> Option<&DependencyKey> {
        match self {
            Self::Reference { key, .. } | Self::OnDemand { key, .. } => Some(key),
            Self::Literal { .. } => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { scope, key } => write!(f, "{scope}({:?})", key.token()),
            Self::OnDemand {
                scope,
                key,
                injection_point,
            } => write!(
                f,
                "{scope}({:?}, [{:?}, {:?}, {:?}])",
                key.token(),
                injection_point.declaring_type,
                injection_point.method,
                injection_point.parameter
            ),
            Self::Literal { value } => write!(f, "{value}"),
        }
    }
}

/// A method call on the instance under construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Method name
    pub method: String,
    /// Argument expressions
    pub arguments: Vec<Expr>,
}

/// construct → setters → post-construct for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instantiation {
    /// Class to construct
    pub class: String,
    /// Constructor argument expressions
    pub arguments: Vec<Expr>,
    /// Setter calls, in declaration order
    #[serde(default)]
    pub setters: Vec<MethodCall>,
    /// Post-construct hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_construct: Option<String>,
}

impl Instantiation {
    /// Setter call named `method`, if it was emitted
    pub fn setter(&self, method: &str) -> Option<&MethodCall> {
        self.setters.iter().find(|call| call.method == method)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, var: &str) -> fmt::Result {
        writeln!(
            f,
            "let {var} = new {}({});",
            self.class,
            join(&self.arguments)
        )?;
        for call in &self.setters {
            writeln!(f, "{var}.{}({});", call.method, join(&call.arguments))?;
        }
        if let Some(hook) = &self.post_construct {
            writeln!(f, "{var}.{hook}();")?;
        }
        Ok(())
    }
}

fn join(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// What a unit does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum UnitBody {
    /// Build an instance of a class
    Construct {
        /// Instantiation program
        instantiation: Instantiation,
    },
    /// Return a literal
    Instance {
        /// The literal
        value: serde_json::Value,
    },
    /// Build a provider and return what it provides
    Provide {
        /// Provider instantiation program
        provider: Instantiation,
        /// Context string for the provider
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
}

/// Generated instantiation code for one dependency key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledUnit {
    /// Unit format version
    pub format_version: u32,
    /// Key this unit instantiates
    pub key: DependencyKey,
    /// Scope of the binding
    pub scope: Scope,
    /// Program
    pub body: UnitBody,
}

impl CompiledUnit {
    /// Create a unit in the current format version
    pub fn new(key: DependencyKey, scope: Scope, body: UnitBody) -> Self {
        Self {
            format_version: UNIT_FORMAT_VERSION,
            key,
            scope,
            body,
        }
    }

    /// Instantiation program of a class or provider unit
    pub fn instantiation(&self) -> Option<&Instantiation> {
        match &self.body {
            UnitBody::Construct { instantiation } => Some(instantiation),
            UnitBody::Provide { provider, .. } => Some(provider),
            UnitBody::Instance { .. } => None,
        }
    }

    /// Fail unless the unit was written in the current format version
    pub fn check_version(&self) -> Result<()> {
        if self.format_version == UNIT_FORMAT_VERSION {
            Ok(())
        } else {
            Err(Error::format_version(
                "compiled unit",
                UNIT_FORMAT_VERSION,
                self.format_version,
            ))
        }
    }
}

impl fmt::Display for CompiledUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {} ({})", self.key, self.scope)?;
        match &self.body {
            UnitBody::Construct { instantiation } => {
                instantiation.render(f, "instance")?;
                writeln!(f, "return instance;")
            }
            UnitBody::Instance { value } => writeln!(f, "return {value};"),
            UnitBody::Provide { provider, context } => {
                provider.render(f, "provider")?;
                match context {
                    Some(context) => writeln!(f, "return provider.get({context:?});"),
                    None => writeln!(f, "return provider.get();"),
                }
            }
        }
    }
}
