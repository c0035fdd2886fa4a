//! Compilation driver
//!
//! Walks the binding table in key order, compiles every binding that has no
//! unit yet, persists each unit and finally persists the module snapshot.

use super::unit::UnitCompiler;
use diac_domain::error::{Error, Result};
use diac_domain::ports::{ArtifactStore, InjectorCapability, StructuralIntrospector};
use diac_domain::{BindingTable, DependencyKey, ModuleSnapshot, UnitFailure};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Outcome of a successful compilation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Keys whose unit was generated and written by this pass
    pub compiled: Vec<DependencyKey>,
    /// Keys that already had a unit
    pub skipped: Vec<DependencyKey>,
}

impl CompileReport {
    /// Whether the pass wrote nothing
    pub fn is_noop(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Accumulator for one pass
struct CompilationProgress {
    report: CompileReport,
    failures: Vec<UnitFailure>,
}

impl CompilationProgress {
    fn new() -> Self {
        Self {
            report: CompileReport::default(),
            failures: Vec::new(),
        }
    }

    fn record_failure(&mut self, key: &DependencyKey, error: Error) {
        warn!(%key, %error, "Failed to compile binding");
        self.failures.push(UnitFailure {
            key: key.clone(),
            error,
        });
    }

    fn into_result(self) -> Result<CompileReport> {
        if self.failures.is_empty() {
            Ok(self.report)
        } else {
            Err(Error::Compilation {
                failures: self.failures,
            })
        }
    }
}

/// Compiles a binding table into stored units
pub struct CompilationDriver {
    store: Arc<dyn ArtifactStore>,
    introspector: Arc<dyn StructuralIntrospector>,
}

impl CompilationDriver {
    /// Create a driver writing to `store`
    pub fn new(
        store: Arc<dyn ArtifactStore>,
        introspector: Arc<dyn StructuralIntrospector>,
    ) -> Self {
        Self {
            store,
            introspector,
        }
    }

    /// Store the driver writes to
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Compile every binding without a unit, then rewrite the module snapshot
    ///
    /// A failing binding does not stop the pass and leaves no unit behind;
    /// all failures are reported together once the snapshot is written.
    pub fn compile_all(
        &self,
        table: &BindingTable,
        capability: InjectorCapability<'_>,
    ) -> Result<CompileReport> {
        let span = info_span!("compile_all", bindings = table.len());
        let _guard = span.enter();

        let compiler = UnitCompiler::new(table, capability, self.introspector.as_ref());
        let mut progress = CompilationProgress::new();

        for (key, binding) in table {
            if self.store.unit_exists(key) {
                debug!(%key, "Unit already compiled, skipping");
                progress.report.skipped.push(key.clone());
                continue;
            }

            let written = compiler
                .compile(key, binding)
                .and_then(|unit| self.store.write_unit(&unit));
            match written {
                Ok(()) => {
                    debug!(%key, binding = %binding.describe(), "Compiled unit");
                    progress.report.compiled.push(key.clone());
                }
                Err(error) => progress.record_failure(key, error),
            }
        }

        self.store.write_snapshot(&ModuleSnapshot::from_table(table))?;

        info!(
            compiled = progress.report.compiled.len(),
            skipped = progress.report.skipped.len(),
            failed = progress.failures.len(),
            "Compilation pass finished"
        );
        progress.into_result()
    }

    /// Compile every missing unit of the stored module snapshot
    pub fn recompile_from_snapshot(
        &self,
        capability: InjectorCapability<'_>,
    ) -> Result<CompileReport> {
        let snapshot = self
            .store
            .read_snapshot()?
            .ok_or_else(|| Error::storage("no module snapshot in the artifact store"))?;
        let table = snapshot.into_table()?;
        self.compile_all(&table, capability)
    }
}
