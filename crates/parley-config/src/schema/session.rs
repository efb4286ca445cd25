//! Session and interactive loop configuration.

use serde::{Deserialize, Serialize};

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session used when the caller does not pick one.
    pub default_id: String,
    /// Input that ends the interactive loop (compared case-insensitively).
    pub exit_sentinel: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_id: "default".into(),
            exit_sentinel: "e".into(),
        }
    }
}
