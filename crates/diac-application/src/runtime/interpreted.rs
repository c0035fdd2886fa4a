//! Interpreted injector
//!
//! Resolves bindings by walking their descriptors at request time. Runtime
//! lookups of untargeted classes known to the class loader are bound just in
//! time, so the binding table grows as the application runs; the compiler
//! picks those bindings up afterwards.

use super::assembly::{Construction, ResolutionStack, SingletonCache};
use diac_domain::error::{Error, Result};
use diac_domain::ports::{ClassLoader, Injector, ProvisionContext};
use diac_domain::{
    Argument, Arguments, Binding, BindingTable, Dependency, DependencyKey, InjectionPoint, Scope,
    Value,
};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Injector that resolves descriptors directly, without compiled units
pub struct InterpretedInjector {
    classes: Arc<dyn ClassLoader>,
    table: RwLock<BindingTable>,
    singletons: SingletonCache,
    resolving: ResolutionStack,
}

impl InterpretedInjector {
    /// Create an injector over a configured table
    pub fn new(table: BindingTable, classes: Arc<dyn ClassLoader>) -> Self {
        Self {
            classes,
            table: RwLock::new(table),
            singletons: SingletonCache::default(),
            resolving: ResolutionStack::default(),
        }
    }

    /// Configured bindings plus everything discovered so far
    pub fn bindings(&self) -> Result<BindingTable> {
        let table = self
            .table
            .read()
            .map_err(|_| Error::internal("binding table lock poisoned"))?;
        Ok(table.clone())
    }

    /// Binding for `key`, binding an untargeted class just in time if needed
    fn binding_for(&self, key: &DependencyKey) -> Result<Option<Binding>> {
        {
            let table = self
                .table
                .read()
                .map_err(|_| Error::internal("binding table lock poisoned"))?;
            if let Some(binding) = table.get(key) {
                return Ok(Some(binding.clone()));
            }
        }

        if !key.is_any() {
            return Ok(None);
        }
        let Some(signature) = self.classes.introspector().signature_of(&key.interface) else {
            return Ok(None);
        };

        let mut table = self
            .table
            .write()
            .map_err(|_| Error::internal("binding table lock poisoned"))?;
        let binding = Binding::Dependency(Dependency::from_signature(signature, Scope::Prototype));
        if table.insert_discovered(key.clone(), binding) {
            debug!(%key, "Bound untargeted class just in time");
        }
        Ok(table.get(key).cloned())
    }

    fn resolve(&self, key: &DependencyKey, point: Option<&InjectionPoint>) -> Result<Value> {
        match self.binding_for(key)? {
            Some(binding) => self.resolve_binding(key, &binding, point),
            None => Err(Error::unbound(key.clone(), point.cloned())),
        }
    }

    fn resolve_binding(
        &self,
        key: &DependencyKey,
        binding: &Binding,
        point: Option<&InjectionPoint>,
    ) -> Result<Value> {
        let scope = binding.scope();
        if scope == Scope::Singleton {
            if let Some(value) = self.singletons.get(key)? {
                return Ok(value);
            }
        }

        let _guard = self.resolving.enter(key)?;
        let value = match binding {
            Binding::Dependency(dependency) => self.instantiate(dependency)?.finish(),
            Binding::Instance { value } => Value::Literal(value.clone()),
            Binding::Provider {
                provider, context, ..
            } => self.instantiate(provider)?.provide(&ProvisionContext {
                injector: self,
                injection_point: point,
                context: context.as_deref(),
            })?,
        };

        match scope {
            Scope::Singleton => self.singletons.keep_first(key, value),
            Scope::Prototype => Ok(value),
        }
    }

    fn instantiate(&self, dependency: &Dependency) -> Result<Construction> {
        let introspector = self.classes.introspector();
        let arguments = self.arguments(introspector.constructor_of(dependency))?;
        let mut construction =
            Construction::begin(self.classes.as_ref(), &dependency.class, arguments)?;

        for setter in introspector.setters_of(dependency) {
            match self.arguments(introspector.arguments_of(setter)) {
                Ok(arguments) => construction.call(&setter.method, arguments)?,
                Err(error) if error.is_unbound() && introspector.is_optional(setter) => {
                    debug!(class = %dependency.class, method = %setter.method, "Skipping optional setter");
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(hook) = introspector.post_construct_of(dependency) {
            construction.call(hook, Arguments::default())?;
        }
        Ok(construction)
    }

    fn arguments(&self, arguments: &[Argument]) -> Result<Arguments> {
        arguments
            .iter()
            .map(|argument| self.argument(argument))
            .collect::<Result<Vec<_>>>()
            .map(Arguments::new)
    }

    fn argument(&self, argument: &Argument) -> Result<Value> {
        let point = Some(&argument.injection_point);
        match self.binding_for(&argument.key)? {
            Some(binding) => self.resolve_binding(&argument.key, &binding, point),
            None => match argument.default() {
                Some(value) => Ok(Value::Literal(value.clone())),
                None => Err(Error::unbound(argument.key.clone(), point.cloned())),
            },
        }
    }
}

impl Injector for InterpretedInjector {
    fn get_instance_at(
        &self,
        key: &DependencyKey,
        injection_point: Option<&InjectionPoint>,
    ) -> Result<Value> {
        self.resolve(key, injection_point)
    }
}
