//! RecoBot: French natural-language movie recommendations over a local
//! SQLite catalog.
//!
//! This library exposes the internal modules for the CLI and for testing.

pub mod catalog_store;
pub mod cli_style;
pub mod config;
pub mod search;
pub mod sqlite_persistence;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use search::{QueryFilters, Recommendation, Recommender};
pub use vocabulary::{VocabularyError, VocabularyStore};
