//! Configuration types module

pub mod app;
pub mod compiler;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use compiler::CompilerConfig;
pub use logging::LoggingConfig;
