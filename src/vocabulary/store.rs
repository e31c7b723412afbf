//! SQLite-backed vocabulary with an in-memory snapshot for readers.

use super::models::{normalize_word, Category, VocabularyEntry, VocabularyError, DEFAULT_WORD_WEIGHT};
use super::schema::VOCABULARY_SCHEMA;
use super::seed::{
    GENRE_SEED, GENRE_SEED_WEIGHT, STOP_WORDS_SEED, THEME_SEED, THEME_SEED_WEIGHT,
};
use crate::sqlite_persistence::SharedConnection;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Immutable view of the vocabulary at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: HashMap<String, VocabularyEntry>,
    stop_words: HashSet<String>,
}

impl Vocabulary {
    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn entry(&self, word: &str) -> Option<&VocabularyEntry> {
        self.entries.get(word)
    }

    /// Entries whose word equals one of the tokens, in token order.
    ///
    /// A token that appears twice yields its entry twice.
    pub fn classify<I, S>(&self, tokens: I) -> Vec<&VocabularyEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|token| self.entries.get(token.as_ref()))
            .collect()
    }

    /// Every word classified under `category`/`subcategory`, sorted.
    pub fn words_for(&self, category: Category, subcategory: &str) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .entries
            .values()
            .filter(|e| e.category == category && e.subcategory == subcategory)
            .map(|e| e.word.as_str())
            .collect();
        words.sort_unstable();
        words
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

/// Persistent vocabulary.
///
/// Writers hold the snapshot write lock for the whole upsert, so a reader
/// either sees the vocabulary before the write or after it.
pub struct VocabularyStore {
    conn: SharedConnection,
    snapshot: RwLock<Arc<Vocabulary>>,
}

impl VocabularyStore {
    /// Open the vocabulary tables on `conn`, seeding empty tables when
    /// `seed` is set.
    pub fn new(conn: SharedConnection, seed: bool) -> Result<Self> {
        let vocabulary = {
            let mut locked = conn.lock().unwrap();
            VOCABULARY_SCHEMA
                .apply(&mut locked)
                .context("Failed to initialize vocabulary schema")?;
            if seed {
                seed_if_empty(&mut locked)?;
            }
            load_vocabulary(&locked)?
        };

        info!(
            "Vocabulary loaded: {} significant words, {} stop words",
            vocabulary.len(),
            vocabulary.stop_word_count()
        );

        Ok(Self {
            conn,
            snapshot: RwLock::new(Arc::new(vocabulary)),
        })
    }

    /// Current snapshot. Cheap, and stable for as long as the caller holds it.
    pub fn snapshot(&self) -> Arc<Vocabulary> {
        self.snapshot.read().unwrap().clone()
    }

    /// Administrative entry point: classify `word` with the default weight.
    pub fn add_vocabulary_word(
        &self,
        word: &str,
        category: &str,
        subcategory: &str,
    ) -> Result<VocabularyEntry, VocabularyError> {
        let category = Category::parse(category)
            .ok_or_else(|| VocabularyError::UnknownCategory(category.trim().to_string()))?;
        self.upsert_entry(word, category, subcategory, DEFAULT_WORD_WEIGHT)
    }

    /// Insert or replace the entry for `word`.
    pub fn upsert_entry(
        &self,
        word: &str,
        category: Category,
        subcategory: &str,
        weight: u32,
    ) -> Result<VocabularyEntry, VocabularyError> {
        let word = normalize_word(word)?;
        let subcategory = subcategory.trim().to_lowercase();
        if subcategory.is_empty() {
            return Err(VocabularyError::EmptySubcategory);
        }
        if weight == 0 {
            return Err(VocabularyError::ZeroWeight);
        }
        let entry = VocabularyEntry {
            word,
            category,
            subcategory,
            weight,
        };

        let mut snapshot = self.snapshot.write().unwrap();
        {
            let conn = self.conn.lock().unwrap();
            write_entry(&conn, &entry)?;
        }
        let mut next = Vocabulary::clone(&snapshot);
        next.entries.insert(entry.word.clone(), entry.clone());
        *snapshot = Arc::new(next);

        debug!(
            "Upserted vocabulary word '{}' -> {}/{} (weight {})",
            entry.word,
            entry.category.as_str(),
            entry.subcategory,
            entry.weight
        );
        Ok(entry)
    }

    /// Insert `word` into the stop-word set. Returns the stored form.
    pub fn add_stop_word(&self, word: &str) -> Result<String, VocabularyError> {
        let word = normalize_word(word)?;

        let mut snapshot = self.snapshot.write().unwrap();
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "INSERT OR REPLACE INTO stop_words (word) VALUES (?1)",
                params![word],
            )?;
        }
        let mut next = Vocabulary::clone(&snapshot);
        next.stop_words.insert(word.clone());
        *snapshot = Arc::new(next);

        debug!("Added stop word '{}'", word);
        Ok(word)
    }

    /// Re-read both tables from the database, replacing the snapshot.
    pub fn reload(&self) -> Result<()> {
        let mut snapshot = self.snapshot.write().unwrap();
        let vocabulary = {
            let conn = self.conn.lock().unwrap();
            load_vocabulary(&conn)?
        };
        *snapshot = Arc::new(vocabulary);
        Ok(())
    }
}

fn write_entry(conn: &Connection, entry: &VocabularyEntry) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT OR REPLACE INTO significant_words (word, category, subcategory, weight)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            entry.word,
            entry.category.as_str(),
            entry.subcategory,
            entry.weight
        ],
    )
}

fn table_is_empty(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count == 0)
}

fn seed_if_empty(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    if table_is_empty(&tx, "significant_words")? {
        let mut seeded = 0;
        let tables = [
            (Category::Genre, GENRE_SEED, GENRE_SEED_WEIGHT),
            (Category::Theme, THEME_SEED, THEME_SEED_WEIGHT),
        ];
        for (category, table, weight) in tables {
            for (subcategory, words) in table {
                for word in *words {
                    let entry = VocabularyEntry {
                        word: word.to_string(),
                        category,
                        subcategory: subcategory.to_string(),
                        weight,
                    };
                    write_entry(&tx, &entry).context("Failed to seed vocabulary")?;
                    seeded += 1;
                }
            }
        }
        info!("Seeded {} significant words", seeded);
    }

    if table_is_empty(&tx, "stop_words")? {
        for word in STOP_WORDS_SEED {
            tx.execute(
                "INSERT OR REPLACE INTO stop_words (word) VALUES (?1)",
                params![word],
            )
            .context("Failed to seed stop words")?;
        }
        info!("Seeded {} stop words", STOP_WORDS_SEED.len());
    }

    tx.commit()?;
    Ok(())
}

fn load_vocabulary(conn: &Connection) -> Result<Vocabulary> {
    let mut entries = HashMap::new();
    let mut stmt =
        conn.prepare("SELECT word, category, subcategory, weight FROM significant_words")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<i64>>(3)?,
        ))
    })?;
    for row in rows {
        let (word, category, subcategory, weight) = row?;
        let Some(category) = category.as_deref().and_then(Category::parse) else {
            warn!(
                "Skipping vocabulary word '{}' with unknown category {:?}",
                word, category
            );
            continue;
        };
        let Some(subcategory) = subcategory.filter(|s| !s.trim().is_empty()) else {
            warn!("Skipping vocabulary word '{}' without subcategory", word);
            continue;
        };
        let weight = weight
            .and_then(|w| u32::try_from(w).ok())
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_WORD_WEIGHT);
        let word = word.to_lowercase();
        entries.insert(
            word.clone(),
            VocabularyEntry {
                word,
                category,
                subcategory,
                weight,
            },
        );
    }

    let mut stmt = conn.prepare("SELECT word FROM stop_words")?;
    let stop_words = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .map(|w| w.map(|w| w.to_lowercase()))
        .collect::<rusqlite::Result<HashSet<_>>>()?;

    Ok(Vocabulary {
        entries,
        stop_words,
    })
}
