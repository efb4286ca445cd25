//! End-to-end conversation scenarios through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parley_ai::{
    AiClient, AiError, AiResponse, GenerationBackend, HistoryStore, Message, PromptTemplate,
    PromptedBackend, TokenUsage, TurnOrchestrator,
};
use parley_common::SessionId;

/// Arithmetic "model": answers from a lookup keyed by the question.
struct Calculator;

#[async_trait]
impl GenerationBackend for Calculator {
    async fn generate(&self, question: &str, _history: &str) -> Result<String, AiError> {
        match question {
            "What is 2+2?" => Ok("4".into()),
            "And times 3?" => Ok("12".into()),
            other => Err(AiError::ApiError(format!("cannot answer {other:?}"))),
        }
    }
}

/// Client that fails the first `failures` calls, then echoes the prompt length.
struct FlakyClient {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl AiClient for FlakyClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(AiError::NetworkError("connection reset".into()));
        }
        Ok(AiResponse {
            content: format!("{} chars", messages[0].content().len()),
            usage: TokenUsage {
                input_tokens: 5,
                output_tokens: 2,
            },
        })
    }

    fn provider(&self) -> &str {
        "flaky"
    }

    fn model(&self) -> &str {
        "flaky-1"
    }
}

async fn render(orch: &TurnOrchestrator, id: &str) -> String {
    let handle = orch.session(&SessionId::new(id)).await;
    let history = handle.lock().await;
    history.render()
}

#[tokio::test]
async fn default_session_arithmetic_conversation() {
    let orch = TurnOrchestrator::new(Arc::new(HistoryStore::new()));

    assert_eq!(orch.ask("What is 2+2?", &Calculator).await.unwrap(), "4");
    assert_eq!(render(&orch, "default").await, "User: What is 2+2?\nAssistant: 4\n");

    assert_eq!(orch.ask("And times 3?", &Calculator).await.unwrap(), "12");
    assert_eq!(
        render(&orch, "default").await,
        "User: What is 2+2?\nAssistant: 4\nUser: And times 3?\nAssistant: 12\n"
    );
}

#[tokio::test]
async fn untouched_session_renders_empty() {
    let orch = TurnOrchestrator::new(Arc::new(HistoryStore::new()));
    orch.handle_turn("What is 2+2?", &SessionId::new("s1"), &Calculator)
        .await
        .unwrap();

    assert_eq!(render(&orch, "s2").await, "");
    assert_eq!(orch.store().len().await, 2);
}

#[tokio::test]
async fn failed_first_turn_reports_error_and_records_nothing() {
    let orch = TurnOrchestrator::new(Arc::new(HistoryStore::new()));
    let result = orch
        .handle_turn("What is the meaning of life?", &SessionId::new("new"), &Calculator)
        .await;

    assert!(matches!(result, Err(AiError::ApiError(_))));
    assert_eq!(render(&orch, "new").await, "");
}

#[tokio::test]
async fn prompted_backend_recovers_after_transient_failure() {
    let store = Arc::new(HistoryStore::new());
    let orch = TurnOrchestrator::new(Arc::clone(&store));
    let backend = PromptedBackend::new(Arc::new(FlakyClient {
        failures: 1,
        calls: AtomicUsize::new(0),
    }))
    .with_template(PromptTemplate::new("{history}{question}"));

    let id = SessionId::new("retry");
    assert!(orch.handle_turn("hello", &id, &backend).await.is_err());
    assert_eq!(render(&orch, "retry").await, "");

    let answer = orch.handle_turn("hello", &id, &backend).await.unwrap();
    assert_eq!(answer, "5 chars");
    assert_eq!(render(&orch, "retry").await, "User: hello\nAssistant: 5 chars\n");

    let usage = backend.usage().unwrap();
    assert_eq!(usage.call_count(), 1);
    assert_eq!(usage.total_tokens(), 7);
}

#[tokio::test]
async fn orchestrators_sharing_a_store_share_sessions() {
    let store = Arc::new(HistoryStore::new());
    let first = TurnOrchestrator::new(Arc::clone(&store));
    let second = TurnOrchestrator::new(Arc::clone(&store));

    first.ask("What is 2+2?", &Calculator).await.unwrap();
    assert_eq!(render(&second, "default").await, "User: What is 2+2?\nAssistant: 4\n");
}
