//! On-demand fallback compilation
//!
//! Arguments whose key is not in the binding table cannot be compiled to a
//! direct reference. Under an injector that runs compiled units, the call is
//! deferred to that injector at runtime, keeping the scope it reports; under
//! plain interpreted resolution, or when the key has no unit yet, the declared
//! default is embedded instead.

use diac_domain::error::{Error, Result};
use diac_domain::ports::{InjectorCapability, NotCompiled};
use diac_domain::{Argument, Expr};
use tracing::trace;

/// Compiles arguments that are unknown to the binding table
#[derive(Debug, Clone, Copy)]
pub struct OnDemandCompiler<'a> {
    capability: InjectorCapability<'a>,
}

impl<'a> OnDemandCompiler<'a> {
    /// Create a compiler running under `capability`
    pub fn new(capability: InjectorCapability<'a>) -> Self {
        Self { capability }
    }

    /// Deferred call, embedded default, or `Unbound`
    pub fn compile(&self, argument: &Argument) -> Result<Expr> {
        if let InjectorCapability::Compiling(query) = self.capability {
            match query.scope_of(&argument.key) {
                Ok(scope) => {
                    return Ok(Expr::OnDemand {
                        scope,
                        key: argument.key.clone(),
                        injection_point: argument.injection_point.clone(),
                    });
                }
                Err(NotCompiled) => {
                    trace!(key = %argument.key, "no compiled unit, falling back to default");
                }
            }
        }

        match argument.default() {
            Some(value) => Ok(Expr::literal(value.clone())),
            None => Err(Error::unbound(
                argument.key.clone(),
                Some(argument.injection_point.clone()),
            )),
        }
    }
}
