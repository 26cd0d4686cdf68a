#![forbid(unsafe_code)]
//! eco9 core primitives.
//!
//! Everything here is deterministic: no wall-clock reads, no I/O beyond
//! environment lookups for path resolution.

pub mod canonical;
mod config;
mod errors;
mod types;

pub use canonical::{sha256_hex, stable_json_hash_hex};
pub use config::{resolve_eco9_config_path, resolve_eco9_data_dir};
pub use errors::{
    ConfigPathScope, Error, ErrorContext, ExitCode, MachineError, Result, ResultExt,
};
pub use types::ids::{ActivityId, UserId, ID_MAX_LEN};

pub const CRATE_NAME: &str = "eco9-core";

pub const ENV_ECO9_CONFIG: &str = "ECO9_CONFIG";
pub const ENV_ECO9_DATA_DIR: &str = "ECO9_DATA_DIR";
pub const ENV_ECO9_LOG_LEVEL: &str = "ECO9_LOG_LEVEL";
pub const ENV_ECO9_LOG_JSON: &str = "ECO9_LOG_JSON";
