//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - the provider reported an error diagnostic
pub const ERROR: i32 = 1;

/// Validation error - the configuration does not match the schema
pub const VALIDATION_ERROR: i32 = 2;

/// Not found - the object does not exist in the cluster
pub const NOT_FOUND: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or unknown type name (sysexits.h EX_USAGE)
pub const USAGE_ERROR: i32 = 64;

/// Data error - an input file is not valid YAML or JSON (sysexits.h EX_DATAERR)
pub const DATA_ERROR: i32 = 65;

/// Unavailable - the cluster cannot be reached or the provider is offline (sysexits.h EX_UNAVAILABLE)
pub const UNAVAILABLE: i32 = 69;

/// Config error - invalid provider configuration (sysexits.h EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
