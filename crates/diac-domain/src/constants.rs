//! Domain layer constants

/// Qualifier name matching any binding of an interface
pub const ANY_NAME: &str = "";

/// Separator between the interface and the qualifier in key tokens
pub const KEY_TOKEN_SEPARATOR: char = '-';

/// Stands for `::` in key tokens
pub const KEY_TOKEN_PATH: char = '.';

/// Prefix of a hex-escaped byte in key tokens
pub const KEY_TOKEN_ESCAPE: char = '_';

/// Current compiled unit format version
pub const UNIT_FORMAT_VERSION: u32 = 1;

/// Current module snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;
