//! Claude API client struct, request building, and response parsing.

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};

use crate::{AiError, AiResponse, Message, Role, TokenUsage};

use super::config::{AuthMethod, ClaudeConfig};

pub(crate) const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client.
pub struct ClaudeClient {
    pub(crate) config: ClaudeConfig,
    pub(crate) http: reqwest::Client,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Build auth headers for the configured auth method.
    pub(crate) fn auth_headers(&self) -> Result<HeaderMap, AiError> {
        let invalid =
            |e: InvalidHeaderValue| AiError::NotConfigured(format!("invalid Claude credential: {e}"));
        let mut headers = HeaderMap::new();
        match self.config.auth_method {
            AuthMethod::ApiKey => {
                headers.insert(
                    "x-api-key",
                    HeaderValue::from_str(&self.config.token).map_err(invalid)?,
                );
            }
            AuthMethod::OAuth => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", self.config.token))
                        .map_err(invalid)?,
                );
            }
        }
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }

    /// Build the JSON request body for the Messages API.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|msg| {
                let role = match msg.role() {
                    Role::Assistant => "assistant",
                    Role::User | Role::Unknown => "user",
                };
                serde_json::json!({
                    "role": role,
                    "content": msg.content(),
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": msgs,
        });

        if let Some(ref system) = self.config.system_prompt {
            body["system"] = serde_json::json!(system);
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let blocks = json["content"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no content in response".to_string()))?;

        let content: String = blocks
            .iter()
            .filter(|b| b["type"] == "text")
            .filter_map(|b| b["text"].as_str())
            .collect();

        let usage = TokenUsage {
            input_tokens: json["usage"]["input_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["output_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(auth: AuthMethod) -> ClaudeClient {
        ClaudeClient::new(ClaudeConfig::new("token-abc", auth)).unwrap()
    }

    #[test]
    fn request_body_maps_roles() {
        let c = client(AuthMethod::ApiKey);
        let body = c.build_request_body(&[
            Message::user("q"),
            Message::assistant("a"),
            Message::new(Role::Unknown, "n"),
        ]);

        let msgs = body["messages"].as_array().unwrap();
        assert_eq!(msgs[0]["role"], "user");
        assert_eq!(msgs[1]["role"], "assistant");
        assert_eq!(msgs[2]["role"], "user");
        assert_eq!(msgs[1]["content"], "a");
        assert_eq!(body["max_tokens"], 1024);
        assert!(body.get("system").is_none());
    }

    #[test]
    fn request_body_includes_system_prompt() {
        let c = ClaudeClient::new(
            ClaudeConfig::new("t", AuthMethod::ApiKey).with_system_prompt("be brief"),
        )
        .unwrap();
        let body = c.build_request_body(&[Message::user("q")]);
        assert_eq!(body["system"], "be brief");
    }

    #[test]
    fn auth_headers_follow_method() {
        let headers = client(AuthMethod::ApiKey).auth_headers().unwrap();
        assert_eq!(headers["x-api-key"], "token-abc");
        assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);

        let headers = client(AuthMethod::OAuth).auth_headers().unwrap();
        assert_eq!(headers["authorization"], "Bearer token-abc");
        assert!(headers.get("x-api-key").is_none());
    }

    #[test]
    fn invalid_token_is_not_configured() {
        let c = ClaudeClient::new(ClaudeConfig::new("bad\ntoken", AuthMethod::ApiKey)).unwrap();
        assert!(matches!(c.auth_headers(), Err(AiError::NotConfigured(_))));
    }

    #[test]
    fn parse_response_joins_text_blocks() {
        let c = client(AuthMethod::ApiKey);
        let json = serde_json::json!({
            "content": [
                {"type": "text", "text": "Hello, "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "world"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 4}
        });
        let response = c.parse_response(json).unwrap();
        assert_eq!(response.content, "Hello, world");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 4);
    }

    #[test]
    fn parse_response_without_content_is_error() {
        let c = client(AuthMethod::ApiKey);
        let result = c.parse_response(serde_json::json!({"error": "boom"}));
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
