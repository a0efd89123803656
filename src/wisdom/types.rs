// Core types for the wisdom request/response cycle
//
// Both provider clients deserialize into the same raw payload shape and
// normalize it into `Wisdom`, so fallback handling lives here once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback answer when a provider omits the field.
pub const FALLBACK_ANSWER: &str = "No scriptural answer found.";
/// Fallback scripture reference when a provider omits the field.
pub const FALLBACK_REFERENCE: &str = "Unknown";
/// Fallback topic when a provider omits the field.
pub const FALLBACK_TOPIC: &str = "Wisdom";
/// Fallback explanation when a provider omits the field.
pub const FALLBACK_EXPLANATION: &str = "";

/// Bible translation the answer must quote from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Version {
    Niv,
    Kjv,
    Esv,
    Nlt,
    Nkjv,
    Nasb,
}

impl Version {
    /// All supported translations, in display order.
    pub fn all() -> [Version; 6] {
        [
            Version::Niv,
            Version::Kjv,
            Version::Esv,
            Version::Nlt,
            Version::Nkjv,
            Version::Nasb,
        ]
    }

    /// Short code, e.g. "KJV".
    pub fn code(&self) -> &'static str {
        match self {
            Version::Niv => "NIV",
            Version::Kjv => "KJV",
            Version::Esv => "ESV",
            Version::Nlt => "NLT",
            Version::Nkjv => "NKJV",
            Version::Nasb => "NASB",
        }
    }

    /// Full translation name, used in prompt templating.
    pub fn full_name(&self) -> &'static str {
        match self {
            Version::Niv => "New International Version",
            Version::Kjv => "King James Version",
            Version::Esv => "English Standard Version",
            Version::Nlt => "New Living Translation",
            Version::Nkjv => "New King James Version",
            Version::Nasb => "New American Standard Bible",
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::Niv
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NIV" => Ok(Version::Niv),
            "KJV" => Ok(Version::Kjv),
            "ESV" => Ok(Version::Esv),
            "NLT" => Ok(Version::Nlt),
            "NKJV" => Ok(Version::Nkjv),
            "NASB" => Ok(Version::Nasb),
            other => Err(format!(
                "Unknown translation '{}'. Supported: NIV, KJV, ESV, NLT, NKJV, NASB",
                other
            )),
        }
    }
}

/// Raw four-field payload as providers return it.
///
/// Every field is optional: models occasionally drop keys even under a
/// response schema, and the local path has no schema enforcement at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WisdomFields {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Normalized outcome of one dispatch.
///
/// Exactly one of "all four content fields populated" or "error populated"
/// holds for a well-formed value. The calling layer branches on `error`
/// presence and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wisdom {
    pub answer: String,
    pub reference: String,
    pub topic: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Wisdom {
    /// Build a successful result from a raw payload, substituting the
    /// documented fallback for each missing or blank field.
    pub fn from_fields(fields: WisdomFields) -> Self {
        Self {
            answer: or_fallback(fields.answer, FALLBACK_ANSWER),
            reference: or_fallback(fields.reference, FALLBACK_REFERENCE),
            topic: or_fallback(fields.topic, FALLBACK_TOPIC),
            explanation: fields.explanation.unwrap_or_else(|| FALLBACK_EXPLANATION.to_string()),
            error: None,
        }
    }

    /// Build a failed result carrying an already-classified, user-facing
    /// message. Content fields are left empty.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            answer: String::new(),
            reference: String::new(),
            topic: String::new(),
            explanation: String::new(),
            error: Some(message.into()),
        }
    }

    /// True when the dispatch failed and `error` carries the message.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}
