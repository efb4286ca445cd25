//! Conversation engine for Parley.
//!
//! Provides:
//! - Per-session message history with deterministic text rendering
//! - A lazily populated, concurrency-safe store of session histories
//! - A turn orchestrator that feeds rendered history to a generation
//!   backend and records the exchange only when generation succeeds
//! - Claude and Gemini API clients plus a prompt-template adapter that
//!   turns either into a generation backend
//! - Token usage tracking

pub mod backend;
pub mod claude;
pub mod gemini;
pub mod prompt;
pub mod session;
pub mod token_tracker;
pub mod turn;

use async_trait::async_trait;

pub use backend::{GenerationBackend, PromptedBackend};
pub use claude::{ClaudeClient, ClaudeConfig};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::PromptTemplate;
pub use session::{HistoryStore, SessionHandle, SessionHistory};
pub use token_tracker::TokenTracker;
pub use turn::TurnOrchestrator;

/// A hosted model API that answers a list of messages.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;

    /// Provider name used for token accounting (e.g. "claude").
    fn provider(&self) -> &str;

    /// Model the client sends requests to.
    fn model(&self) -> &str;
}

/// One utterance in a conversation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// A speaker the history does not recognise; rendered without a prefix.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Prefix written before the message content in rendered history.
    pub fn prefix(self) -> &'static str {
        match self {
            Role::User => "User: ",
            Role::Assistant => "Assistant: ",
            Role::Unknown => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Why a generation call did not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Not configured: {0}")]
    NotConfigured(String),
}
