//! Tests for the script injector

use crate::test_utils::*;
use diac_application::{Binder, CompilationDriver, Module, ScriptInjector};
use diac_domain::ports::{ArtifactStore, Injector, InjectorCapability, NotCompiled, ScopeQuery};
use diac_domain::{DependencyKey, Expr, InjectionPoint, ModuleSnapshot, Scope};
use std::sync::Arc;

/// Store with every unit of `module` compiled
fn compiled(module: &dyn Module) -> Arc<MemoryArtifactStore> {
    let classes = Arc::new(registry());
    let table = Binder::configure_module(classes.as_ref(), module).unwrap();
    let store = Arc::new(MemoryArtifactStore::new());
    CompilationDriver::new(Arc::clone(&store) as Arc<dyn ArtifactStore>, classes)
        .compile_all(&table, InjectorCapability::Interpreted)
        .unwrap();
    store
}

/// Store holding only the module snapshot of `module`
fn snapshot_only(module: &dyn Module) -> Arc<MemoryArtifactStore> {
    let table = Binder::configure_module(&registry(), module).unwrap();
    let store = Arc::new(MemoryArtifactStore::new());
    store
        .write_snapshot(&ModuleSnapshot::from_table(&table))
        .unwrap();
    store
}

fn script(store: &Arc<MemoryArtifactStore>) -> ScriptInjector {
    ScriptInjector::new(
        Arc::clone(store) as Arc<dyn ArtifactStore>,
        Arc::new(registry()),
    )
}

#[test]
fn test_runs_compiled_units() {
    let store = compiled(&FullModule);
    let injector = script(&store);

    let car = injector
        .get_instance(&DependencyKey::new(CAR))
        .unwrap()
        .downcast::<Car>()
        .unwrap();
    assert!(car.initialized);
    assert_eq!(car.engine.cylinders, 8);
    assert_eq!(car.radio.as_ref().unwrap().station, "fm");
}

#[test]
fn test_scopes_follow_the_units() {
    let store = compiled(&CarModule);
    let injector = script(&store);

    let first = injector
        .get_instance(&DependencyKey::new(CAR))
        .unwrap()
        .downcast::<Car>()
        .unwrap();
    let second = injector
        .get_instance(&DependencyKey::new(CAR))
        .unwrap()
        .downcast::<Car>()
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.engine, &second.engine));
}

#[test]
fn test_embedded_default_evaluates_to_declared_value() {
    let store = compiled(&CarModule);
    let engine = script(&store)
        .get_instance(&DependencyKey::new(ENGINE))
        .unwrap()
        .downcast::<Engine>()
        .unwrap();
    assert_eq!(engine.cylinders, 4);
}

#[test]
fn test_scope_query_reports_compiled_units_only() {
    let store = compiled(&CarModule);
    let injector = script(&store);

    assert_eq!(
        injector.scope_of(&DependencyKey::new(ENGINE)),
        Ok(Scope::Singleton)
    );
    assert_eq!(
        injector.scope_of(&DependencyKey::new(CAR)),
        Ok(Scope::Prototype)
    );
    assert_eq!(injector.scope_of(&car_radio()), Err(NotCompiled));
}

#[test]
fn test_missing_unit_is_compiled_from_snapshot() {
    let store = snapshot_only(&CarModule);
    let injector = script(&store);

    let car = injector
        .get_instance(&DependencyKey::new(CAR))
        .unwrap()
        .downcast::<Car>()
        .unwrap();
    assert!(car.initialized);
    assert!(store.unit(&DependencyKey::new(CAR)).is_some());
    assert!(store.unit(&DependencyKey::new(ENGINE)).is_some());
}

#[test]
fn test_untargeted_class_is_compiled_just_in_time() {
    let store = Arc::new(MemoryArtifactStore::new());
    let injector = script(&store);

    let radio = injector.get_instance(&DependencyKey::new(RADIO)).unwrap();
    assert!(radio.downcast::<Radio>().is_some());
    assert_eq!(
        store.list_units().unwrap(),
        vec![DependencyKey::new(RADIO).token()]
    );
}

#[test]
fn test_compiled_dependency_outside_table_becomes_on_demand_call() {
    let store = snapshot_only(&AModule);
    let injector = script(&store);

    // B gets a unit first, so compiling A can defer to it
    injector.get_instance(&DependencyKey::new(B)).unwrap();
    let a = injector.get_instance(&DependencyKey::new(A)).unwrap();
    assert!(a.downcast::<A>().is_some());

    let unit = store.unit(&DependencyKey::new(A)).unwrap();
    assert_eq!(
        unit.instantiation().unwrap().arguments,
        vec![Expr::OnDemand {
            scope: Scope::Prototype,
            key: DependencyKey::new(B),
            injection_point: InjectionPoint::new(A, "new", "b"),
        }]
    );
}

#[test]
fn test_unknown_key_is_unbound() {
    let store = snapshot_only(&CarModule);
    let error = script(&store)
        .get_instance(&DependencyKey::new("app::Missing"))
        .unwrap_err();
    assert!(error.is_unbound());
}

#[test]
fn test_provider_unit_passes_context() {
    let store = compiled(&FullModule);
    let connection = script(&store)
        .get_instance(&DependencyKey::new(CONNECTION))
        .unwrap();
    assert_eq!(
        connection.as_literal().and_then(|value| value.as_str()),
        Some("db://local:primary:-")
    );
}
