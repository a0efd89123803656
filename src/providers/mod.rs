// Pluggable wisdom providers
//
// This module abstracts over the backends that turn a question into a
// structured scripture answer (cloud Gemini API, local Ollama-compatible
// server), giving the dispatcher one unified interface. Selection happens
// by configuration value in `factory`, not by class hierarchy.

use async_trait::async_trait;

pub mod error;
pub mod factory;
pub mod gemini;
pub mod instruction;
pub mod ollama;
pub mod retry;

pub use error::ProviderError;
pub use factory::create_provider;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use retry::{with_retry, with_retry_attempts, DEFAULT_MAX_ATTEMPTS};

use crate::wisdom::types::{Version, Wisdom};

/// Capability interface implemented by every provider client.
///
/// Implementations own their transport, retry behavior and payload repair;
/// callers only see the structured result or a classified error.
#[async_trait]
pub trait WisdomProvider: Send + Sync {
    /// Answer a question from the given translation.
    async fn ask(&self, question: &str, version: Version) -> Result<Wisdom, ProviderError>;

    /// Short provider tag (e.g. "gemini", "ollama").
    fn name(&self) -> &str;

    /// Model identifier this provider will query.
    fn default_model(&self) -> &str;
}
