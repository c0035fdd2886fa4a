//! Tests for the two-phase entry point

use crate::test_utils::*;
use diac_application::DiCompiler;
use diac_domain::ports::ArtifactStore;
use diac_domain::{DependencyKey, Error, Expr, Scope};
use std::sync::Arc;

fn compiler(module: &dyn diac_application::Module) -> (DiCompiler, Arc<MemoryArtifactStore>) {
    let store = Arc::new(MemoryArtifactStore::new());
    let compiler = DiCompiler::from_module(
        module,
        Arc::new(registry()),
        Arc::clone(&store) as Arc<dyn ArtifactStore>,
    )
    .unwrap();
    (compiler, store)
}

#[test]
fn test_two_phase_compiles_discovered_dependency() {
    let (compiler, store) = compiler(&AModule);

    let a = compiler.get_instance(&DependencyKey::new(A)).unwrap();
    assert!(a.downcast::<A>().is_some());

    let a_unit = store.unit(&DependencyKey::new(A)).unwrap();
    assert_eq!(
        a_unit.instantiation().unwrap().arguments,
        vec![Expr::Reference {
            scope: Scope::Prototype,
            key: DependencyKey::new(B),
        }]
    );
    assert!(store.unit(&DependencyKey::new(B)).is_some());
    assert!(compiler.bindings().unwrap().contains(&DependencyKey::new(B)));
}

#[test]
fn test_compile_alone_cannot_see_undiscovered_bindings() {
    let (compiler, store) = compiler(&AModule);

    let error = compiler.compile().unwrap_err();
    assert!(matches!(error, Error::Compilation { .. }));
    assert!(store.unit(&DependencyKey::new(A)).is_none());
}

#[test]
fn test_repeated_requests_write_nothing_new() {
    let (compiler, store) = compiler(&FullModule);

    compiler.get_instance(&DependencyKey::new(CAR)).unwrap();
    let writes = store.unit_writes();
    compiler.get_instance(&DependencyKey::new(CAR)).unwrap();

    assert_eq!(store.unit_writes(), writes);
}

#[test]
fn test_unbound_request_fails_before_compiling() {
    let (compiler, store) = compiler(&CarModule);

    let error = compiler
        .get_instance(&DependencyKey::new("app::Missing"))
        .unwrap_err();
    assert!(error.is_unbound());
    assert_eq!(store.unit_count(), 0);
    assert!(store.snapshot().is_none());
}
