//! Domain entities

pub mod binding;
pub mod binding_table;
pub mod compiled_unit;
pub mod module_snapshot;

pub use binding::{Argument, Binding, ClassSignature, Dependency, SetterMethod};
pub use binding_table::BindingTable;
pub use compiled_unit::{CompiledUnit, Expr, Instantiation, MethodCall, UnitBody};
pub use module_snapshot::{ModuleSnapshot, SnapshotEntry};
