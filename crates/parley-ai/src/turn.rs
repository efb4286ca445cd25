//! Conversation turns: render history, generate, record the exchange.

use std::sync::Arc;
use std::time::Duration;

use parley_common::{new_correlation_id, SessionId};
use tracing::{debug, info_span, warn, Instrument};

use crate::backend::GenerationBackend;
use crate::session::{HistoryStore, SessionHandle};
use crate::{AiError, Message};

/// Runs question/answer turns against a shared [`HistoryStore`].
///
/// Holds no per-turn state. A successful turn appends exactly the user
/// question and the assistant answer to the session; a failed turn leaves
/// the session untouched and hands the error back.
pub struct TurnOrchestrator {
    store: Arc<HistoryStore>,
    timeout: Option<Duration>,
}

impl TurnOrchestrator {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Treat a generation call that runs longer than `timeout` as failed.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    /// History handle for `session_id`, created if it does not exist yet.
    pub async fn session(&self, session_id: &SessionId) -> SessionHandle {
        self.store.get_or_create(session_id).await
    }

    /// Ask `question` in the default session.
    pub async fn ask(
        &self,
        question: &str,
        backend: &dyn GenerationBackend,
    ) -> Result<String, AiError> {
        self.handle_turn(question, &SessionId::default(), backend)
            .await
    }

    /// Run one turn in `session_id`.
    ///
    /// The session stays locked from render to append, so concurrent turns
    /// on the same session run one after another.
    pub async fn handle_turn(
        &self,
        question: &str,
        session_id: &SessionId,
        backend: &dyn GenerationBackend,
    ) -> Result<String, AiError> {
        let span = info_span!("turn", session = %session_id, turn = %new_correlation_id());

        async {
            let handle = self.store.get_or_create(session_id).await;
            let mut history = handle.lock().await;
            let context = history.render();
            debug!(messages = history.len(), "rendered history");

            let answer = match self.generate(backend, question, &context).await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(error = %e, "generation failed, history unchanged");
                    return Err(e);
                }
            };

            history.append([Message::user(question), Message::assistant(answer.as_str())]);
            debug!(messages = history.len(), "recorded turn");
            Ok(answer)
        }
        .instrument(span)
        .await
    }

    async fn generate(
        &self,
        backend: &dyn GenerationBackend,
        question: &str,
        context: &str,
    ) -> Result<String, AiError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, backend.generate(question, context))
                .await
                .map_err(|_| AiError::Timeout)?,
            None => backend.generate(question, context).await,
        }
    }
}
