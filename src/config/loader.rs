// Configuration loader
// Loads provider settings from ~/.manna/config.toml or environment variable

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use super::settings::{Config, ProviderEntry};

/// Load configuration from the Manna config file or environment.
pub fn load_config() -> Result<Config> {
    // Try loading from ~/.manna/config.toml first
    if let Some(config) = try_load_from_manna_config()? {
        return Ok(config);
    }

    // Fall back to environment variable
    if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
        if !api_key.is_empty() {
            return Ok(Config::with_provider(ProviderEntry::Gemini {
                api_key,
                model: None,
            }));
        }
    }

    // No config found - explain both setups
    bail!(
        "No configuration found. Create ~/.manna/config.toml with either:\n\n\
        [provider]\n\
        type = \"gemini\"\n\
        api_key = \"...\"\n\n\
        or, for a locally hosted model:\n\n\
        [provider]\n\
        type = \"ollama\"\n\
        endpoint = \"http://localhost:11434\"\n\
        model = \"llama3.2\"\n\n\
        Alternatively, set the environment variable:\n\
        export GEMINI_API_KEY=\"...\""
    );
}

fn manna_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".manna"))
}

fn try_load_from_manna_config() -> Result<Option<Config>> {
    let dir = manna_dir()?;
    let config_path = dir.join("config.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let mut config = parse_config(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    config.favorites_path = dir.join("favorites.json");

    Ok(Some(config))
}

/// Parse and validate a config file body.
pub(crate) fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("Invalid config format")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}
