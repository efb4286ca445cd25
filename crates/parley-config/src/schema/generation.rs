//! Generation call configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Per-turn timeout in seconds; 0 disables it.
    pub timeout_secs: u32,
    /// Prompt template with `{history}` and `{question}` placeholders.
    /// `None` uses the built-in template.
    pub prompt_template: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            prompt_template: None,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(u64::from(self.timeout_secs)))
    }
}
