// Google Gemini API provider implementation
//
// Uses structured generation: the request carries a response schema naming
// the four answer fields, so the model is constrained to return the JSON
// envelope directly rather than prose that needs scraping.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ProviderError;
use super::instruction::system_instruction;
use super::retry::{with_retry_attempts, DEFAULT_MAX_ATTEMPTS};
use super::WisdomProvider;
use crate::wisdom::types::{Version, Wisdom, WisdomFields};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Low temperature biases toward deterministic, text-faithful answers.
const TEMPERATURE: f32 = 0.5;

/// Google Gemini API provider.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_attempts: u32,
}

impl GeminiClient {
    /// Create a new Gemini client. An empty key is accepted here and
    /// reported as a configuration error at ask time, so a missing
    /// credential surfaces as a structured result rather than a panic.
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the retry attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn build_request(&self, question: &str, version: Version) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: question.to_string(),
                }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: system_instruction(version),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json".to_string(),
                response_schema: wisdom_schema(),
            },
        }
    }

    /// Send a single generation request (no retry).
    async fn generate_once(&self, request: &GeminiRequest) -> Result<Wisdom, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        tracing::debug!(model = %self.model, "sending generation request to Gemini");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("invalid response body: {}", e)))?;

        extract_wisdom(payload)
    }
}

#[async_trait]
impl WisdomProvider for GeminiClient {
    async fn ask(&self, question: &str, version: Version) -> Result<Wisdom, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Config(
                "No Gemini API key is configured. Set GEMINI_API_KEY or add one under [provider] in ~/.manna/config.toml."
                    .to_string(),
            ));
        }

        let request = self.build_request(question, version);
        with_retry_attempts(|| self.generate_once(&request), self.max_attempts).await
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

/// Output schema constraining the model to the four named string fields,
/// all required. Gemini's schema dialect uses uppercase type names.
fn wisdom_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "answer": { "type": "STRING" },
            "reference": { "type": "STRING" },
            "topic": { "type": "STRING" },
            "explanation": { "type": "STRING" }
        },
        "required": ["answer", "reference", "topic", "explanation"]
    })
}

/// Pull the candidate text out of the response and decode the four-field
/// object. Missing fields are repaired by fallbacks; a payload with no
/// usable candidate text is a malformed response.
fn extract_wisdom(response: GeminiResponse) -> Result<Wisdom, ProviderError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| {
            ProviderError::Malformed("Gemini returned no candidates in response".to_string())
        })?;

    let fields: WisdomFields = serde_json::from_str(&text).map_err(|e| {
        ProviderError::Malformed(format!("candidate text is not the expected JSON object: {}", e))
    })?;

    Ok(Wisdom::from_fields(fields))
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
