//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `diac_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "diac.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "diac";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "DIAC";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "DIAC_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log file rotation size in bytes (10MB)
pub const LOG_ROTATION_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of log files to keep
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// ARTIFACT STORE CONSTANTS
// ============================================================================

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = ".diac/cache";

/// File extension of compiled units
pub const UNIT_EXTENSION: &str = "json";

/// File name of the module snapshot
pub const MODULE_SNAPSHOT_FILENAME: &str = "_module.json";

/// Suffix appended to an artifact path to name its lock file
pub const LOCK_SUFFIX: &str = ".lock";

/// Prefix of temporary files written before the final rename
pub const TEMP_PREFIX: &str = ".tmp-";
