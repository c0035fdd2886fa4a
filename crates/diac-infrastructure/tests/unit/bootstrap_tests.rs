//! Composition root tests, including several compilers sharing one cache

use crate::test_utils::*;
use diac_domain::ports::{ArtifactStore, ClassLoader, DescriptorIntrospector, Injector};
use diac_domain::{DependencyKey, Expr, Scope};
use diac_infrastructure::config::ConfigBuilder;
use diac_infrastructure::{AppContext, init_app};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

fn context(dir: &TempDir) -> AppContext {
    let config = ConfigBuilder::new()
        .with_cache_dir(dir.path().join("cache"))
        .build()
        .unwrap();
    init_app(config).unwrap()
}

#[test]
fn test_context_uses_configured_cache_dir() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir);

    assert_eq!(context.file_store().root(), dir.path().join("cache"));
    assert_eq!(context.config.compiler.cache_dir, dir.path().join("cache"));
}

#[test]
fn test_compiled_cache_runs_in_a_fresh_injector() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir);
    let classes = Arc::new(registry());

    let compiler = context
        .compiler(&SchedulerModule, Arc::clone(&classes))
        .unwrap();
    compiler.get_instance(&DependencyKey::new(SCHEDULER)).unwrap();

    let scheduler_unit = context
        .store()
        .read_unit(&DependencyKey::new(SCHEDULER))
        .unwrap()
        .unwrap();
    assert_eq!(scheduler_unit.scope, Scope::Singleton);
    assert_eq!(
        scheduler_unit.instantiation().unwrap().arguments,
        vec![Expr::Reference {
            scope: Scope::Prototype,
            key: DependencyKey::new(CLOCK),
        }]
    );

    let injector = context.script_injector(classes as Arc<dyn ClassLoader>);
    let first = injector.get_instance(&DependencyKey::new(SCHEDULER)).unwrap();
    let second = injector.get_instance(&DependencyKey::new(SCHEDULER)).unwrap();
    assert!(first.same_instance(&second));
    assert_eq!(first.downcast::<Scheduler>().unwrap().clock.tick_ms, 10);
}

#[test]
fn test_driver_recompiles_snapshot_after_cache_loss() {
    let dir = TempDir::new().unwrap();
    let context = context(&dir);
    context
        .compiler(&SchedulerModule, Arc::new(registry()))
        .unwrap()
        .get_instance(&DependencyKey::new(SCHEDULER))
        .unwrap();

    let store = context.file_store();
    std::fs::remove_file(store.unit_path(&DependencyKey::new(SCHEDULER))).unwrap();

    let report = context
        .driver(Arc::new(DescriptorIntrospector))
        .recompile_from_snapshot(diac_domain::ports::InjectorCapability::Interpreted)
        .unwrap();

    assert_eq!(report.compiled, vec![DependencyKey::new(SCHEDULER)]);
    assert!(store.unit_exists(&DependencyKey::new(SCHEDULER)));
}

/// Threads stand in for processes here: every write opens its own lock file
/// descriptor, so `flock` serializes threads the same way it serializes
/// processes. `diac/tests/unit/cli_tests.rs` races real `diac compile` processes.
#[test]
fn test_concurrent_compilers_share_one_cache() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("cache");
    let barrier = Arc::new(Barrier::new(4));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let config = ConfigBuilder::new().with_cache_dir(cache).build().unwrap();
                let context = init_app(config).unwrap();
                let compiler = context
                    .compiler(&SchedulerModule, Arc::new(registry()))
                    .unwrap();
                barrier.wait();
                compiler.get_instance(&DependencyKey::new(SCHEDULER)).unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let context = context(&dir);
    let store = context.file_store();
    assert_eq!(
        store.list_units().unwrap(),
        vec!["svc.Clock-".to_string(), "svc.Scheduler-".to_string()]
    );
    for key in [DependencyKey::new(CLOCK), DependencyKey::new(SCHEDULER)] {
        assert_eq!(store.read_unit(&key).unwrap().unwrap().key, key);
    }
    assert_eq!(store.read_snapshot().unwrap().unwrap().len(), 2);

    let leftovers: Vec<_> = std::fs::read_dir(&cache)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(diac_infrastructure::constants::TEMP_PREFIX))
        .collect();
    assert!(leftovers.is_empty());
}
