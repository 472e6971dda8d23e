//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a [`MachineConfig`](super::MachineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid configuration JSON
    #[error("Failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
