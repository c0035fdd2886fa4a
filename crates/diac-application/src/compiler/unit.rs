//! Binding unit compilation

use super::argument::ArgumentResolver;
use diac_domain::error::Result;
use diac_domain::ports::{InjectorCapability, StructuralIntrospector};
use diac_domain::{
    Binding, BindingTable, CompiledUnit, Dependency, DependencyKey, Instantiation, MethodCall,
    UnitBody,
};
use tracing::debug;

/// Compiles one binding into one [`CompiledUnit`]
pub struct UnitCompiler<'a> {
    resolver: ArgumentResolver<'a>,
    introspector: &'a dyn StructuralIntrospector,
}

impl<'a> UnitCompiler<'a> {
    /// Create a compiler resolving against `table`
    pub fn new(
        table: &'a BindingTable,
        capability: InjectorCapability<'a>,
        introspector: &'a dyn StructuralIntrospector,
    ) -> Self {
        Self {
            resolver: ArgumentResolver::new(table, capability),
            introspector,
        }
    }

    /// Generate the unit for `key`
    pub fn compile(&self, key: &DependencyKey, binding: &Binding) -> Result<CompiledUnit> {
        let body = match binding {
            Binding::Dependency(dependency) => UnitBody::Construct {
                instantiation: self.instantiation(dependency)?,
            },
            Binding::Instance { value } => UnitBody::Instance {
                value: value.clone(),
            },
            Binding::Provider {
                provider, context, ..
            } => UnitBody::Provide {
                provider: self.instantiation(provider)?,
                context: context.clone(),
            },
        };
        Ok(CompiledUnit::new(key.clone(), binding.scope(), body))
    }

    /// construct → setters (declaration order) → post-construct
    ///
    /// A setter is emitted with all of its arguments or not at all: an unbound
    /// argument drops an optional setter and fails a required one.
    fn instantiation(&self, dependency: &Dependency) -> Result<Instantiation> {
        let arguments = self
            .resolver
            .resolve_all(self.introspector.constructor_of(dependency))?;

        let mut setters = Vec::new();
        for setter in self.introspector.setters_of(dependency) {
            match self
                .resolver
                .resolve_all(self.introspector.arguments_of(setter))
            {
                Ok(arguments) => setters.push(MethodCall {
                    method: setter.method.clone(),
                    arguments,
                }),
                Err(error) if error.is_unbound() && self.introspector.is_optional(setter) => {
                    debug!(
                        class = %dependency.class,
                        method = %setter.method,
                        %error,
                        "dropping optional setter"
                    );
                }
                Err(error) => return Err(error),
            }
        }

        Ok(Instantiation {
            class: dependency.class.clone(),
            arguments,
            setters,
            post_construct: self
                .introspector
                .post_construct_of(dependency)
                .map(ToString::to_string),
        })
    }
}
