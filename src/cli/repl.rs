// Interactive chat REPL
//
// Owns the conversation state: active translation, favorites store and the
// last successful exchange. One dispatch runs at a time; the prompt only
// comes back once the current question resolved.

use anyhow::Result;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Config;
use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::wisdom::types::{Version, Wisdom};
use crate::wisdom::get_wisdom;

use super::commands::{format_help, Command};

pub struct Repl {
    config: Config,
    favorites: FavoritesStore,
    version: Version,
    last_exchange: Option<(String, Version, Wisdom)>,
}

impl Repl {
    pub fn new(config: Config) -> Result<Self> {
        let favorites = FavoritesStore::load(&config.favorites_path)?;
        let version = config.default_version;
        Ok(Self {
            config,
            favorites,
            version,
            last_exchange: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;

        println!(
            "Manna. Answers from the {} ({}). Type /help for commands.",
            self.version.full_name(),
            self.version.code()
        );

        loop {
            match editor.readline("you> ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());

                    match Command::parse(&line) {
                        Some(command) => {
                            if !self.handle_command(command)? {
                                break;
                            }
                        }
                        None => self.ask(&line).await,
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    async fn ask(&mut self, question: &str) {
        let wisdom = get_wisdom(question, self.version, &self.config.provider).await;
        print_wisdom(&wisdom);
        if !wisdom.is_error() {
            self.last_exchange = Some((question.to_string(), self.version, wisdom));
        }
    }

    /// Execute a slash command. Returns false when the REPL should exit.
    fn handle_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Help => println!("{}", format_help()),

            Command::Quit => {
                println!("Goodbye!");
                return Ok(false);
            }

            Command::Translation(None) => {
                let all = Version::all()
                    .iter()
                    .map(|v| v.code())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Current translation: {}. Available: {}", self.version, all);
            }

            Command::Translation(Some(requested)) => match requested.parse::<Version>() {
                Ok(version) => {
                    self.version = version;
                    println!("Now answering from the {} ({}).", version.full_name(), version);
                }
                Err(message) => println!("{}", message.red()),
            },

            Command::Save => match self.last_exchange.take() {
                Some((question, version, wisdom)) => {
                    self.favorites
                        .add(FavoriteEntry::new(&question, version, &wisdom))?;
                    println!("Saved to favorites ({} total).", self.favorites.len());
                }
                None => println!("Nothing to save yet. Ask a question first."),
            },

            Command::Favorites => {
                if self.favorites.is_empty() {
                    println!("No favorites saved yet. Use /save after an answer.");
                } else {
                    for (index, entry) in self.favorites.entries().iter().enumerate() {
                        println!(
                            "{}. {} {}",
                            index + 1,
                            entry.reference.as_str().dark_cyan(),
                            entry.question
                        );
                    }
                }
            }

            Command::Remove(Some(number)) => {
                let id = self
                    .favorites
                    .entries()
                    .get(number.wrapping_sub(1))
                    .map(|entry| entry.id.clone());
                match id {
                    Some(id) => {
                        self.favorites.remove(&id)?;
                        println!("Removed favorite {}.", number);
                    }
                    None => println!("No favorite numbered {}.", number),
                }
            }

            Command::Remove(None) => println!("Usage: /remove <number> (see /favorites)"),

            Command::Provider => println!(
                "Provider: {} (type '{}')",
                self.config.provider.display_name(),
                self.config.provider.provider_type()
            ),

            Command::Unknown(head) => {
                println!("Unknown command: {}. Type /help for available commands.", head)
            }
        }

        Ok(true)
    }
}

/// Render a dispatch outcome. The only branch is error presence.
pub fn print_wisdom(wisdom: &Wisdom) {
    if let Some(error) = &wisdom.error {
        println!("{}", error.as_str().red());
        return;
    }

    println!();
    println!("{}", wisdom.answer.as_str().bold());
    println!(
        "{}",
        format!("{} ({})", wisdom.reference, wisdom.topic).dark_cyan()
    );
    if !wisdom.explanation.is_empty() {
        println!("{}", wisdom.explanation.as_str().grey());
    }
    println!();
}
