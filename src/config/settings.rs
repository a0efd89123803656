// Configuration records
//
// The provider entry is a tagged union so the config file reads naturally:
//
// ```toml
// [provider]
// type = "gemini"
// api_key = "..."
// ```
//
// or:
//
// ```toml
// [provider]
// type = "ollama"
// endpoint = "http://localhost:11434"
// model = "llama3.2"
// ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::wisdom::types::Version;

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

/// A single provider entry: the cloud API or a local model server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderEntry {
    Gemini {
        #[serde(default)]
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_endpoint")]
        endpoint: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
}

impl ProviderEntry {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "Gemini",
            Self::Ollama { .. } => "Ollama (local)",
        }
    }

    /// Short provider-type tag (e.g. "gemini", "ollama").
    pub fn provider_type(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "gemini",
            Self::Ollama { .. } => "ollama",
        }
    }

    /// True for the local-server variant.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Ollama { .. })
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderEntry,

    /// Translation used when none is requested explicitly.
    #[serde(default)]
    pub default_version: Version,

    /// Where the favorites store lives. Derived from the config location,
    /// never read from the file itself.
    #[serde(skip)]
    pub favorites_path: PathBuf,
}

impl Config {
    /// Build a config around a provider entry with defaults everywhere else.
    pub fn with_provider(provider: ProviderEntry) -> Self {
        Self {
            provider,
            default_version: Version::default(),
            favorites_path: default_favorites_path(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match &self.provider {
            // An empty API key is legal here; it surfaces as a structured
            // config error at ask time instead of blocking startup.
            ProviderEntry::Gemini { .. } => Ok(()),
            ProviderEntry::Ollama { endpoint, model } => {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    bail!(
                        "Ollama endpoint '{}' must start with http:// or https://",
                        endpoint
                    );
                }
                if model.trim().is_empty() {
                    bail!("Ollama model must not be empty");
                }
                Ok(())
            }
        }
    }
}

/// Default location of the favorites store, next to the config file.
pub fn default_favorites_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".manna")
        .join("favorites.json")
}
