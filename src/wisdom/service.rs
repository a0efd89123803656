// Wisdom dispatch
//
// Routes one request to the configured provider and normalizes every
// outcome into the single result shape. No fallback or formatting logic
// lives here; that belongs to the chosen client.

use crate::config::ProviderEntry;
use crate::providers::{create_provider, WisdomProvider};

use super::types::{Version, Wisdom};

/// Answer a question through the provider selected by `entry`.
///
/// Never fails across this boundary: configuration problems, transport
/// failures and exhausted retries all come back as a `Wisdom` whose error
/// field carries the classified, user-facing message.
pub async fn get_wisdom(question: &str, version: Version, entry: &ProviderEntry) -> Wisdom {
    let provider = match create_provider(entry) {
        Ok(provider) => provider,
        Err(err) => {
            tracing::error!(error = %err, "failed to build provider from configuration");
            return Wisdom::failure(err.user_message());
        }
    };

    dispatch(provider.as_ref(), question, version).await
}

/// Dispatch to an already-built provider and normalize the outcome.
pub async fn dispatch(provider: &dyn WisdomProvider, question: &str, version: Version) -> Wisdom {
    tracing::debug!(provider = provider.name(), %version, "dispatching wisdom request");

    match provider.ask(question, version).await {
        Ok(wisdom) => wisdom,
        Err(err) => {
            tracing::error!(
                provider = provider.name(),
                error = %err,
                "wisdom request failed"
            );
            Wisdom::failure(err.user_message())
        }
    }
}
