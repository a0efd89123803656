// Provider factory
//
// Creates a wisdom provider from a configuration entry. Adding a provider
// means adding one variant and one arm here; the dispatcher is untouched.

use super::gemini::GeminiClient;
use super::ollama::OllamaClient;
use super::{ProviderError, WisdomProvider};
use crate::config::ProviderEntry;

/// Create a `WisdomProvider` from a unified `ProviderEntry`.
pub fn create_provider(entry: &ProviderEntry) -> Result<Box<dyn WisdomProvider>, ProviderError> {
    match entry {
        ProviderEntry::Gemini { api_key, model } => {
            let mut provider = GeminiClient::new(api_key.clone())?;
            if let Some(m) = model {
                provider = provider.with_model(m.clone());
            }
            Ok(Box::new(provider))
        }

        ProviderEntry::Ollama { endpoint, model } => {
            Ok(Box::new(OllamaClient::new(endpoint.clone(), model.clone())?))
        }
    }
}
