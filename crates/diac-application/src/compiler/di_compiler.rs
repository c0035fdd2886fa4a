//! Two-phase entry point
//!
//! The first request is answered by the interpreted injector. Resolving it may
//! add just-in-time bindings to the table, so compilation runs afterwards,
//! over everything that is known once the requested graph has been built.

use super::driver::{CompilationDriver, CompileReport};
use crate::binder::{Binder, Module};
use crate::runtime::InterpretedInjector;
use diac_domain::error::Result;
use diac_domain::ports::{
    ArtifactStore, ClassLoader, Injector, InjectorCapability, StructuralIntrospector,
};
use diac_domain::{BindingTable, DependencyKey, Value};
use std::sync::Arc;
use tracing::info_span;

/// Interpreted injection that compiles the binding graph as it goes
pub struct DiCompiler {
    injector: InterpretedInjector,
    driver: CompilationDriver,
}

impl DiCompiler {
    /// Create a compiler over a configured table
    pub fn new<C>(table: BindingTable, classes: Arc<C>, store: Arc<dyn ArtifactStore>) -> Self
    where
        C: ClassLoader + StructuralIntrospector + 'static,
    {
        Self {
            injector: InterpretedInjector::new(table, Arc::clone(&classes) as Arc<dyn ClassLoader>),
            driver: CompilationDriver::new(store, classes),
        }
    }

    /// Configure `module` and create a compiler over its bindings
    pub fn from_module<C>(
        module: &dyn Module,
        classes: Arc<C>,
        store: Arc<dyn ArtifactStore>,
    ) -> Result<Self>
    where
        C: ClassLoader + StructuralIntrospector + 'static,
    {
        let table = Binder::configure_module(classes.as_ref(), module)?;
        Ok(Self::new(table, classes, store))
    }

    /// Resolve `key` through the interpreted injector, then compile every
    /// binding known afterwards
    pub fn get_instance(&self, key: &DependencyKey) -> Result<Value> {
        let span = info_span!("get_instance", %key);
        let _guard = span.enter();

        let value = self.injector.get_instance(key)?;
        self.compile()?;
        Ok(value)
    }

    /// Compile the current binding table without resolving anything
    pub fn compile(&self) -> Result<CompileReport> {
        let table = self.injector.bindings()?;
        self.driver
            .compile_all(&table, InjectorCapability::Interpreted)
    }

    /// Configured bindings plus those discovered so far
    pub fn bindings(&self) -> Result<BindingTable> {
        self.injector.bindings()
    }

    /// Injector answering the first phase
    pub fn injector(&self) -> &InterpretedInjector {
        &self.injector
    }

    /// Driver running the second phase
    pub fn driver(&self) -> &CompilationDriver {
        &self.driver
    }
}
