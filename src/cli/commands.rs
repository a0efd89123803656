// Slash command handling

use crate::wisdom::types::Version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Show or change the active translation.
    Translation(Option<String>),
    /// Save the last successful exchange to favorites.
    Save,
    /// List saved favorites.
    Favorites,
    /// Remove a favorite by its number in the listing.
    Remove(Option<usize>),
    /// Show the configured provider.
    Provider,
    Unknown(String),
}

impl Command {
    /// Parse a slash command. Returns `None` for plain input, which the
    /// REPL treats as a question for the provider.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let mut parts = trimmed.split_whitespace();
        let head = parts.next().unwrap_or_default();

        match head {
            "/help" => Some(Command::Help),
            "/quit" | "/exit" => Some(Command::Quit),
            "/translation" => Some(Command::Translation(parts.next().map(str::to_string))),
            "/save" => Some(Command::Save),
            "/favorites" => Some(Command::Favorites),
            "/remove" => Some(Command::Remove(parts.next().and_then(|n| n.parse().ok()))),
            "/provider" => Some(Command::Provider),
            other => Some(Command::Unknown(other.to_string())),
        }
    }
}

pub fn format_help() -> String {
    let translations = Version::all()
        .iter()
        .map(|v| v.code())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Available commands:
  /help              - Show this help message
  /quit              - Exit
  /translation [t]   - Show or set the translation ({})
  /save              - Save the last answer to favorites
  /favorites         - List saved favorites
  /remove <n>        - Remove favorite number n
  /provider          - Show the configured provider

Type any question to get started!"#,
        translations
    )
}
