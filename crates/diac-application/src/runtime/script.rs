//! Script injector
//!
//! Runs compiled units from an [`ArtifactStore`]. A key without a unit is
//! compiled on demand against the stored module snapshot (or bound just in
//! time when it names an untargeted registered class), persisted, and then
//! run like any other unit.

use super::assembly::{Construction, ResolutionStack, SingletonCache};
use crate::compiler::UnitCompiler;
use diac_domain::error::{Error, Result};
use diac_domain::ports::{
    ArtifactStore, ClassLoader, Injector, InjectorCapability, NotCompiled, ProvisionContext,
    ScopeQuery,
};
use diac_domain::{
    Arguments, Binding, BindingTable, CompiledUnit, Dependency, DependencyKey, Expr,
    InjectionPoint, Instantiation, Scope, UnitBody, Value,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Injector that evaluates compiled units
pub struct ScriptInjector {
    store: Arc<dyn ArtifactStore>,
    classes: Arc<dyn ClassLoader>,
    units: RwLock<HashMap<DependencyKey, Arc<CompiledUnit>>>,
    table: RwLock<Option<BindingTable>>,
    singletons: SingletonCache,
    resolving: ResolutionStack,
}

impl ScriptInjector {
    /// Create an injector reading units from `store`
    pub fn new(store: Arc<dyn ArtifactStore>, classes: Arc<dyn ClassLoader>) -> Self {
        Self {
            store,
            classes,
            units: RwLock::new(HashMap::new()),
            table: RwLock::new(None),
            singletons: SingletonCache::default(),
            resolving: ResolutionStack::default(),
        }
    }

    /// Store the units are read from
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Unit for `key`, from memory or the store
    fn load_unit(&self, key: &DependencyKey) -> Result<Option<Arc<CompiledUnit>>> {
        {
            let units = self
                .units
                .read()
                .map_err(|_| Error::internal("unit cache lock poisoned"))?;
            if let Some(unit) = units.get(key) {
                return Ok(Some(Arc::clone(unit)));
            }
        }

        match self.store.read_unit(key)? {
            Some(unit) => {
                unit.check_version()?;
                self.remember(unit).map(Some)
            }
            None => Ok(None),
        }
    }

    fn remember(&self, unit: CompiledUnit) -> Result<Arc<CompiledUnit>> {
        let mut units = self
            .units
            .write()
            .map_err(|_| Error::internal("unit cache lock poisoned"))?;
        Ok(Arc::clone(
            units
                .entry(unit.key.clone())
                .or_insert_with(|| Arc::new(unit)),
        ))
    }

    /// Snapshot table, plus a just-in-time binding for `key` when possible
    ///
    /// Just-in-time bindings are not kept in the snapshot table; once their
    /// unit exists, later compilations reach them through the scope query.
    /// Returns `None` when nothing binds `key`.
    fn discover(&self, key: &DependencyKey) -> Result<Option<BindingTable>> {
        let mut table = {
            let mut guard = self
                .table
                .write()
                .map_err(|_| Error::internal("binding table lock poisoned"))?;
            if guard.is_none() {
                let loaded = match self.store.read_snapshot()? {
                    Some(snapshot) => snapshot.into_table()?,
                    None => BindingTable::new(),
                };
                *guard = Some(loaded);
            }
            guard.clone().unwrap_or_default()
        };

        if !table.contains(key) && key.is_any() {
            if let Some(signature) = self.classes.introspector().signature_of(&key.interface) {
                let binding =
                    Binding::Dependency(Dependency::from_signature(signature, Scope::Prototype));
                table.insert_discovered(key.clone(), binding);
                debug!(%key, "Bound untargeted class just in time");
            }
        }

        Ok(table.contains(key).then_some(table))
    }

    fn compile_on_demand(&self, key: &DependencyKey) -> Result<Option<Arc<CompiledUnit>>> {
        let Some(table) = self.discover(key)? else {
            return Ok(None);
        };
        let Some(binding) = table.get(key) else {
            return Ok(None);
        };

        let compiler = UnitCompiler::new(
            &table,
            InjectorCapability::Compiling(self),
            self.classes.introspector(),
        );
        let unit = compiler.compile(key, binding)?;
        self.store.write_unit(&unit)?;
        info!(%key, "Compiled unit on demand");
        self.remember(unit).map(Some)
    }

    fn unit_for(
        &self,
        key: &DependencyKey,
        point: Option<&InjectionPoint>,
    ) -> Result<Arc<CompiledUnit>> {
        if let Some(unit) = self.load_unit(key)? {
            return Ok(unit);
        }
        self.compile_on_demand(key)?
            .ok_or_else(|| Error::unbound(key.clone(), point.cloned()))
    }

    /// Run the unit for `key` through the accessor for `scope`
    fn obtain(
        &self,
        key: &DependencyKey,
        scope: Option<Scope>,
        point: Option<&InjectionPoint>,
    ) -> Result<Value> {
        let unit = self.unit_for(key, point)?;
        let scope = scope.unwrap_or(unit.scope);
        if scope == Scope::Singleton {
            if let Some(value) = self.singletons.get(key)? {
                return Ok(value);
            }
        }

        let _guard = self.resolving.enter(key)?;
        let value = self.evaluate(&unit, point)?;
        match scope {
            Scope::Singleton => self.singletons.keep_first(key, value),
            Scope::Prototype => Ok(value),
        }
    }

    fn evaluate(&self, unit: &CompiledUnit, point: Option<&InjectionPoint>) -> Result<Value> {
        match &unit.body {
            UnitBody::Construct { instantiation } => Ok(self.run(instantiation)?.finish()),
            UnitBody::Instance { value } => Ok(Value::Literal(value.clone())),
            UnitBody::Provide { provider, context } => {
                self.run(provider)?.provide(&ProvisionContext {
                    injector: self,
                    injection_point: point,
                    context: context.as_deref(),
                })
            }
        }
    }

    fn run(&self, instantiation: &Instantiation) -> Result<Construction> {
        let arguments = self.arguments(&instantiation.arguments)?;
        let mut construction =
            Construction::begin(self.classes.as_ref(), &instantiation.class, arguments)?;
        for call in &instantiation.setters {
            construction.call(&call.method, self.arguments(&call.arguments)?)?;
        }
        if let Some(hook) = &instantiation.post_construct {
            construction.call(hook, Arguments::default())?;
        }
        Ok(construction)
    }

    fn arguments(&self, exprs: &[Expr]) -> Result<Arguments> {
        exprs
            .iter()
            .map(|expr| self.expr(expr))
            .collect::<Result<Vec<_>>>()
            .map(Arguments::new)
    }

    fn expr(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Reference { scope, key } => self.obtain(key, Some(*scope), None),
            Expr::OnDemand {
                scope,
                key,
                injection_point,
            } => self.obtain(key, Some(*scope), Some(injection_point)),
            Expr::Literal { value } => Ok(Value::Literal(value.clone())),
        }
    }
}

impl ScopeQuery for ScriptInjector {
    fn scope_of(&self, key: &DependencyKey) -> std::result::Result<Scope, NotCompiled> {
        match self.load_unit(key) {
            Ok(Some(unit)) => Ok(unit.scope),
            Ok(None) => Err(NotCompiled),
            Err(error) => {
                warn!(%key, %error, "Failed to load unit");
                Err(NotCompiled)
            }
        }
    }
}

impl Injector for ScriptInjector {
    fn get_instance_at(
        &self,
        key: &DependencyKey,
        injection_point: Option<&InjectionPoint>,
    ) -> Result<Value> {
        self.obtain(key, None, injection_point)
    }
}
