//! Runtime injectors
//!
//! | Injector | Resolves through |
//! |----------|------------------|
//! | [`InterpretedInjector`] | binding descriptors, at request time |
//! | [`ScriptInjector`] | compiled units from an artifact store |

mod assembly;
pub mod interpreted;
pub mod script;

pub use interpreted::InterpretedInjector;
pub use script::ScriptInjector;
