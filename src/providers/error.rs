// Provider error taxonomy
//
// Every failure a provider client can hit maps onto one of these variants.
// The retry policy keys off `is_transient()`; the dispatcher turns terminal
// errors into user-facing text with `user_message()`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Missing or unusable configuration (credential, endpoint, model).
    /// The message is already user-facing. Never retried.
    #[error("{0}")]
    Config(String),

    /// Non-success HTTP status from a provider endpoint.
    #[error("provider returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport-level failure reaching a cloud endpoint.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport-level failure reaching the local model server.
    /// Treated as a configuration/availability problem, not overload.
    #[error("could not reach local model server at {endpoint}: {detail}")]
    LocalUnavailable { endpoint: String, detail: String },

    /// Response payload missing expected structure or failing JSON parse.
    /// Never retried.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// True for failures likely to succeed on retry: rate limiting,
    /// service overload, and network blips on the cloud path.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Api { status, body } => {
                *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::SERVICE_UNAVAILABLE
                    || body.to_lowercase().contains("overloaded")
            }
            ProviderError::Network(_) => true,
            ProviderError::Config(_)
            | ProviderError::LocalUnavailable { .. }
            | ProviderError::Malformed(_) => false,
        }
    }

    /// Classify this error into a user-facing message.
    ///
    /// The raw error string is logged, never shown; callers get one of the
    /// capacity / rate-limit / connectivity / unknown messages instead.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Config(message) => message.clone(),
            ProviderError::Api { status, body }
                if *status == StatusCode::SERVICE_UNAVAILABLE
                    || body.to_lowercase().contains("overloaded") =>
            {
                "The wisdom service is over capacity right now. Please try again in a few moments."
                    .to_string()
            }
            ProviderError::Api { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                "Too many requests right now. Please wait a moment before asking again."
                    .to_string()
            }
            ProviderError::Api { status, .. } => format!(
                "The wisdom service returned an unexpected error (HTTP {}). Please try again.",
                status
            ),
            ProviderError::Network(_) => {
                "Could not reach the wisdom service. Please check your internet connection and try again."
                    .to_string()
            }
            ProviderError::LocalUnavailable { endpoint, .. } => format!(
                "Could not reach the local model server at {}. Make sure it is running and the endpoint is correct.",
                endpoint
            ),
            ProviderError::Malformed(_) => {
                "The model returned a response that could not be understood. Please try again."
                    .to_string()
            }
        }
    }
}
