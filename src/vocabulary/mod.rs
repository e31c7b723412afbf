mod models;
mod schema;
mod seed;
mod store;

pub use models::{Category, VocabularyEntry, VocabularyError, DEFAULT_WORD_WEIGHT};
pub use schema::VOCABULARY_SCHEMA;
pub use store::{Vocabulary, VocabularyStore};
