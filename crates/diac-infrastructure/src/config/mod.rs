//! Configuration
//!
//! Layered configuration: defaults, then `diac.toml`, then `DIAC_*`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, CompilerConfig, LoggingConfig};
