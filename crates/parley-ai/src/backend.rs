//! Generation backends: the boundary the turn orchestrator calls through.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::prompt::PromptTemplate;
use crate::token_tracker::TokenTracker;
use crate::{AiClient, AiError, Message};

/// Produces an answer to `question` given the rendered session history.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, question: &str, history: &str) -> Result<String, AiError>;

    /// Snapshot of token usage, for backends that track it.
    fn usage(&self) -> Option<TokenTracker> {
        None
    }
}

/// Adapts an [`AiClient`] into a [`GenerationBackend`] by filling a prompt
/// template and sending it as a single user message.
pub struct PromptedBackend {
    client: Arc<dyn AiClient>,
    template: PromptTemplate,
    tracker: Mutex<TokenTracker>,
}

impl PromptedBackend {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            client,
            template: PromptTemplate::default(),
            tracker: Mutex::new(TokenTracker::new()),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn client(&self) -> &Arc<dyn AiClient> {
        &self.client
    }
}

#[async_trait]
impl GenerationBackend for PromptedBackend {
    async fn generate(&self, question: &str, history: &str) -> Result<String, AiError> {
        let prompt = self.template.render(history, question);
        debug!(
            provider = self.client.provider(),
            prompt_len = prompt.len(),
            "sending prompt"
        );

        let response = self.client.send_message(&[Message::user(prompt)]).await?;

        if let Ok(mut tracker) = self.tracker.lock() {
            tracker.record(self.client.provider(), &response.usage);
        }
        Ok(response.content)
    }

    fn usage(&self) -> Option<TokenTracker> {
        self.tracker.lock().ok().map(|tracker| tracker.clone())
    }
}
