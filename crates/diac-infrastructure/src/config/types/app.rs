//! Main application configuration

use super::{CompilerConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Compiler and artifact store configuration
    pub compiler: CompilerConfig,
}
