//! Vocabulary models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level classification of a significant word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Genre,
    Theme,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Genre => "genre",
            Category::Theme => "theme",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "genre" => Some(Category::Genre),
            "theme" | "thème" => Some(Category::Theme),
            _ => None,
        }
    }
}

/// A significant word and what it says about a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub category: Category,
    pub subcategory: String,
    pub weight: u32,
}

/// Weight given to words added through the administrative surface.
pub const DEFAULT_WORD_WEIGHT: u32 = 1;

/// Errors returned by the administrative vocabulary operations.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Word must not be empty")]
    EmptyWord,

    #[error("Word '{0}' must be a single token")]
    MultiTokenWord(String),

    #[error("Unknown category '{0}', expected 'genre' or 'theme'")]
    UnknownCategory(String),

    #[error("Subcategory must not be empty")]
    EmptySubcategory,

    #[error("Weight must be at least 1")]
    ZeroWeight,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Lower-cases and trims a word, rejecting empty or multi-token input.
pub(crate) fn normalize_word(word: &str) -> Result<String, VocabularyError> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(VocabularyError::EmptyWord);
    }
    if word.split_whitespace().count() > 1 {
        return Err(VocabularyError::MultiTokenWord(word));
    }
    Ok(word)
}
