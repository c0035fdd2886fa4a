//! Compilation engine
//!
//! Leaves first:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`argument`] | Resolve one formal argument to an expression |
//! | [`on_demand`] | Fallback for arguments unknown to the binding table |
//! | [`unit`] | Compile one binding into one unit |
//! | [`driver`] | Compile a whole table and persist the artifacts |
//! | [`di_compiler`] | Resolve once, then compile everything now known |

pub mod argument;
pub mod di_compiler;
pub mod driver;
pub mod on_demand;
pub mod unit;

pub use argument::ArgumentResolver;
pub use di_compiler::DiCompiler;
pub use driver::{CompilationDriver, CompileReport};
pub use on_demand::OnDemandCompiler;
pub use unit::UnitCompiler;
