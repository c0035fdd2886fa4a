//! Module DSL
//!
//! Modules describe bindings through a [`Binder`]; class structure comes from
//! the [`StructuralIntrospector`], so a binding to an unknown class fails at
//! configuration time.

use diac_domain::error::{Error, Result};
use diac_domain::ports::StructuralIntrospector;
use diac_domain::{Binding, BindingTable, Dependency, DependencyKey, Scope};

/// A unit of binding configuration
pub trait Module {
    /// Add this module's bindings
    fn configure(&self, binder: &mut Binder<'_>) -> Result<()>;
}

/// Collects bindings into a [`BindingTable`]
pub struct Binder<'a> {
    introspector: &'a dyn StructuralIntrospector,
    table: BindingTable,
}

impl<'a> Binder<'a> {
    /// Create a binder reading class structure from `introspector`
    pub fn new(introspector: &'a dyn StructuralIntrospector) -> Self {
        Self {
            introspector,
            table: BindingTable::new(),
        }
    }

    /// Run `module` against a fresh binder and return its table
    pub fn configure_module(
        introspector: &'a dyn StructuralIntrospector,
        module: &dyn Module,
    ) -> Result<BindingTable> {
        let mut binder = Self::new(introspector);
        binder.install(module)?;
        Ok(binder.into_table())
    }

    /// Add the bindings of another module; later bindings override earlier ones
    pub fn install(&mut self, module: &dyn Module) -> Result<()> {
        module.configure(self)
    }

    /// Start a binding for `interface`
    pub fn bind<S: Into<String>>(&mut self, interface: S) -> BindingBuilder<'_, 'a> {
        BindingBuilder {
            binder: self,
            key: DependencyKey::new(interface),
            scope: Scope::default(),
        }
    }

    /// Bindings collected so far
    pub fn table(&self) -> &BindingTable {
        &self.table
    }

    /// Finish configuration
    pub fn into_table(self) -> BindingTable {
        self.table
    }

    fn dependency(&self, class: &str, scope: Scope) -> Result<Dependency> {
        let signature = self
            .introspector
            .signature_of(class)
            .ok_or_else(|| Error::unknown_class(class))?;
        Ok(Dependency::from_signature(signature, scope))
    }
}

/// One binding under construction
pub struct BindingBuilder<'b, 'a> {
    binder: &'b mut Binder<'a>,
    key: DependencyKey,
    scope: Scope,
}

impl BindingBuilder<'_, '_> {
    /// Qualify the binding with a name
    #[must_use]
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.key.name = name.into();
        self
    }

    /// Set the scope (prototype by default)
    #[must_use]
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Bind to a concrete class
    pub fn to(self, class: &str) -> Result<()> {
        let dependency = self.binder.dependency(class, self.scope)?;
        self.binder
            .table
            .bind(self.key, Binding::Dependency(dependency));
        Ok(())
    }

    /// Bind the interface to itself as a concrete class
    pub fn to_self(self) -> Result<()> {
        let class = self.key.interface.clone();
        self.to(&class)
    }

    /// Bind to a literal
    pub fn to_instance<V: Into<serde_json::Value>>(self, value: V) {
        self.binder.table.bind(
            self.key,
            Binding::Instance {
                value: value.into(),
            },
        );
    }

    /// Bind to the value returned by a provider class
    pub fn to_provider(self, provider_class: &str) -> Result<()> {
        self.provider_binding(provider_class, None)
    }

    /// Bind to a provider class that receives a context string
    pub fn to_provider_with_context<S: Into<String>>(
        self,
        provider_class: &str,
        context: S,
    ) -> Result<()> {
        self.provider_binding(provider_class, Some(context.into()))
    }

    fn provider_binding(self, provider_class: &str, context: Option<String>) -> Result<()> {
        let provider = self.binder.dependency(provider_class, Scope::Prototype)?;
        self.binder.table.bind(
            self.key,
            Binding::Provider {
                provider,
                scope: self.scope,
                context,
            },
        );
        Ok(())
    }
}
