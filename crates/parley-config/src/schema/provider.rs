//! Generation provider selection.

use serde::{Deserialize, Serialize};

/// Which hosted model API answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Claude,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(Self::Claude),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!("unknown provider '{other}' (expected claude or gemini)")),
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderKind,
    /// Model override; `None` keeps the provider's built-in default.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// System instruction sent alongside every request.
    pub system_prompt: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderKind::Claude,
            model: None,
            max_tokens: 1024,
            temperature: 0.7,
            system_prompt: None,
        }
    }
}
