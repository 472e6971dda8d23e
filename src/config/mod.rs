//! Machine configuration.
//!
//! Configuration is plain data: build it in code, or load it from JSON.
//!
//! ```rust
//! use hookfsm::config::{DuplicatePolicy, MachineConfig};
//!
//! let config = MachineConfig::from_json(r#"{ "duplicates": "reject" }"#).unwrap();
//! assert_eq!(config.duplicates, DuplicatePolicy::Reject);
//! assert_eq!(config.history_limit, 64);
//! ```

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Default number of transitions retained in a context's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// How registration treats name collisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept duplicates; lookups resolve to the most recently added match
    #[default]
    Allow,

    /// Fail registration of a duplicate state name, or of an event whose
    /// name already leaves the same state
    Reject,
}

/// Settings applied to a context at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name collision handling for states and events
    pub duplicates: DuplicatePolicy,

    /// Maximum transitions kept in history (0 disables recording)
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Allow,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
