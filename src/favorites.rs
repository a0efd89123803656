// Favorites store
//
// JSON-backed persistence for saved exchanges. The whole collection is
// small (hand-picked answers), so the store rewrites the file on every
// mutation rather than appending.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::wisdom::types::{Version, Wisdom};

/// A single saved exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub reference: String,
    pub topic: String,
    pub explanation: String,
    pub version: Version,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Capture a successful exchange. Callers check `is_error()` first;
    /// saving a failed result is a caller bug, not something to repair here.
    pub fn new(question: impl Into<String>, version: Version, wisdom: &Wisdom) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.into(),
            answer: wisdom.answer.clone(),
            reference: wisdom.reference.clone(),
            topic: wisdom.topic.clone(),
            explanation: wisdom.explanation.clone(),
            version,
            saved_at: Utc::now(),
        }
    }
}

/// Favorites collection with write-through persistence.
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<FavoriteEntry>,
}

impl FavoritesStore {
    /// Load the store from disk. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read favorites from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Favorites file {} is corrupted", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self { path, entries })
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and persist.
    pub fn add(&mut self, entry: FavoriteEntry) -> Result<()> {
        self.entries.push(entry);
        self.save()
    }

    /// Remove the entry with the given id. Returns whether anything was
    /// removed; the file is only rewritten when something changed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize favorites")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write favorites to {}", self.path.display()))?;
        Ok(())
    }
}
