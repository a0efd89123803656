// Local model provider implementation (Ollama-compatible chat API)
//
// Talks to a caller-supplied endpoint instead of a managed cloud
// credential. Failures here are treated as configuration/availability
// problems rather than remote overload, so the default attempt count is 1;
// raise it with `with_max_attempts` for retry parity with the cloud path.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ProviderError;
use super::instruction::{system_instruction, STRICT_JSON_DIRECTIVE};
use super::retry::with_retry_attempts;
use super::WisdomProvider;
use crate::wisdom::types::{Version, Wisdom, WisdomFields};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOCAL_MAX_ATTEMPTS: u32 = 1;

/// Client for a locally hosted Ollama-compatible model server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    max_attempts: u32,
}

impl OllamaClient {
    pub fn new(endpoint: String, model: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            max_attempts: DEFAULT_LOCAL_MAX_ATTEMPTS,
        })
    }

    /// Override the attempt ceiling. The default of 1 preserves the
    /// fail-fast behavior expected of a local server.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn build_request(&self, question: &str, version: Version) -> OllamaChatRequest {
        let system = format!("{} {}", system_instruction(version), STRICT_JSON_DIRECTIVE);
        OllamaChatRequest {
            model: self.model.clone(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system,
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
            stream: false,
            format: "json".to_string(),
        }
    }

    /// Send a single chat request (no retry).
    async fn chat_once(&self, request: &OllamaChatRequest) -> Result<Wisdom, ProviderError> {
        let url = format!("{}/api/chat", self.endpoint);

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "sending chat request to local model");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::LocalUnavailable {
                endpoint: self.endpoint.clone(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let payload: OllamaChatResponse = response.json().await.map_err(|e| {
            ProviderError::Config(format!(
                "The local model server at {} returned an unreadable reply ({}). Check the endpoint configuration.",
                self.endpoint, e
            ))
        })?;

        self.parse_content(&payload.message.content)
    }

    /// Decode the JSON envelope the model was instructed to emit. The
    /// model can ignore the directive, so a parse failure is reported as a
    /// local configuration problem naming the model.
    fn parse_content(&self, content: &str) -> Result<Wisdom, ProviderError> {
        let fields: WisdomFields = serde_json::from_str(content).map_err(|_| {
            ProviderError::Config(format!(
                "The local model '{}' at {} did not return the expected JSON format. Try a different model or check the endpoint.",
                self.model, self.endpoint
            ))
        })?;
        Ok(Wisdom::from_fields(fields))
    }
}

#[async_trait]
impl WisdomProvider for OllamaClient {
    async fn ask(&self, question: &str, version: Version) -> Result<Wisdom, ProviderError> {
        let request = self.build_request(question, version);
        with_retry_attempts(|| self.chat_once(&request), self.max_attempts).await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

// Ollama chat API types

#[derive(Debug, Clone, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}
