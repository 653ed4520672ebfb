#![forbid(unsafe_code)]
//! Shared plumbing for the telerisk crates: exit codes, machine-readable
//! errors, hashing, canonical JSON and recommender configuration.

pub mod canonical;
mod config;
mod error;

use sha2::{Digest, Sha256};

pub use config::{
    resolve_config_path, AssessmentSettings, ConfigError, ConfigSource, LoadedConfig, QaSettings,
    RecommenderConfig, WORKSPACE_CONFIG_PATH,
};
pub use error::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "telerisk-core";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
