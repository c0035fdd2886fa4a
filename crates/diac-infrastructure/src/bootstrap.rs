//! Composition root
//!
//! Wires the configured artifact store into the compilation engine.
//!
//! ```text
//! AppConfig ─▶ FileArtifactStore ─┬─▶ CompilationDriver   (compile a table or the snapshot)
//!                                 ├─▶ DiCompiler          (two-phase entry point)
//!                                 └─▶ ScriptInjector      (run compiled units)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let compiler = context.compiler(&MyModule, Arc::new(classes))?;
//! compiler.get_instance(&DependencyKey::new("app::Car"))?;
//! ```

use crate::config::AppConfig;
use crate::storage::FileArtifactStore;
use diac_application::{Binder, CompilationDriver, DiCompiler, Module, ScriptInjector};
use diac_domain::error::Result;
use diac_domain::ports::{ArtifactStore, ClassLoader, StructuralIntrospector};
use std::sync::Arc;
use tracing::info;

/// Application context: configuration plus the artifact store built from it
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    store: Arc<FileArtifactStore>,
}

impl AppContext {
    /// Artifact store in the configured cache directory
    pub fn store(&self) -> Arc<dyn ArtifactStore> {
        Arc::clone(&self.store) as Arc<dyn ArtifactStore>
    }

    /// File store with its concrete type
    pub fn file_store(&self) -> &FileArtifactStore {
        &self.store
    }

    /// Driver writing into the configured cache
    pub fn driver(&self, introspector: Arc<dyn StructuralIntrospector>) -> CompilationDriver {
        CompilationDriver::new(self.store(), introspector)
    }

    /// Two-phase compiler for `module`
    pub fn compiler<C>(&self, module: &dyn Module, classes: Arc<C>) -> Result<DiCompiler>
    where
        C: ClassLoader + StructuralIntrospector + 'static,
    {
        let table = Binder::configure_module(classes.as_ref(), module)?;
        info!(bindings = table.len(), "Module configured");
        Ok(DiCompiler::new(table, classes, self.store()))
    }

    /// Injector running the units of the configured cache
    pub fn script_injector(&self, classes: Arc<dyn ClassLoader>) -> ScriptInjector {
        ScriptInjector::new(self.store(), classes)
    }
}

/// Build the application context from `config`
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    let store = FileArtifactStore::from_config(&config.compiler);
    info!(
        cache_dir = %store.root().display(),
        pretty = config.compiler.pretty_units,
        "Artifact store ready"
    );
    Ok(AppContext {
        config: Arc::new(config),
        store: Arc::new(store),
    })
}
