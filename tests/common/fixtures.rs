//! Test fixtures
//!
//! Builds the stores on a database file inside a `TempDir`, the way the
//! binary does, and fills the catalog with `test_movies`.

use super::constants::*;
use recobot::catalog_store::{CatalogRecord, CatalogStore, SqliteCatalogStore};
use recobot::search::{MovieDisplay, Recommender};
use recobot::sqlite_persistence::open_shared;
use recobot::vocabulary::VocabularyStore;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn movie(
    title: &str,
    overview: &str,
    release_year: i32,
    genres: &str,
    vote_average: f64,
    vote_count: i64,
    popularity: f64,
) -> CatalogRecord {
    CatalogRecord {
        title: title.to_string(),
        overview: Some(overview.to_string()),
        release_year: Some(release_year),
        genres: Some(genres.to_string()),
        vote_average: Some(vote_average),
        vote_count: Some(vote_count),
        popularity: Some(popularity),
    }
}

pub fn test_movies() -> Vec<CatalogRecord> {
    vec![
        movie(
            TITLE_MAD_MAX,
            "Une course-poursuite sans fin dans un désert post-apocalyptique.",
            2015,
            "Action, Aventure",
            7.6,
            20000,
            80.0,
        ),
        movie(
            TITLE_TOP_GUN,
            "Un pilote d'élite revient former une nouvelle génération.",
            2024,
            "Action, Drame",
            8.2,
            9000,
            120.0,
        ),
        movie(
            TITLE_DINNER,
            "Chaque mercredi, des amis organisent un dîner pour se moquer d'un invité.",
            1998,
            "Comédie",
            7.8,
            3000,
            15.0,
        ),
        movie(
            TITLE_INTOUCHABLES,
            "Une amitié improbable entre un aristocrate et son aide à domicile.",
            2011,
            "Comédie, Drame",
            8.3,
            17000,
            40.0,
        ),
        movie(
            TITLE_GODFATHER,
            "La saga d'une famille mafieuse new-yorkaise.",
            1972,
            "Drame, Crime",
            8.7,
            19000,
            60.0,
        ),
        movie(
            TITLE_OBSCURE_COMEDY,
            "Les petites histoires d'un immeuble parisien.",
            2005,
            "Comédie",
            6.8,
            12,
            1.5,
        ),
        movie(
            TITLE_RUSH,
            "La rivalité de deux pilotes de formule 1 pendant la saison 1976.",
            2013,
            "Action, Drame",
            7.7,
            5000,
            30.0,
        ),
        movie(
            TITLE_BIG_BLUE,
            "Deux plongeurs en apnée repoussent leurs limites.",
            1988,
            "Drame, Aventure",
            7.5,
            2500,
            20.0,
        ),
    ]
}

/// Titles of `movies`, in order.
pub fn titles(movies: &[MovieDisplay]) -> Vec<String> {
    movies
        .iter()
        .map(|m| m.title.clone().unwrap_or_default())
        .collect()
}

pub struct TestCatalog {
    pub recommender: Recommender,
    pub vocabulary: Arc<VocabularyStore>,
    pub catalog: Arc<SqliteCatalogStore>,
    pub db_path: PathBuf,
    // Kept last so the stores are dropped before the directory goes away.
    pub temp_dir: TempDir,
}

impl TestCatalog {
    /// Seeded vocabulary plus the full fixture catalog.
    pub fn new() -> Self {
        let catalog = Self::empty();
        let written = catalog
            .catalog
            .insert_movies(&test_movies())
            .expect("Failed to insert test movies");
        assert_eq!(written, MOVIE_COUNT);
        catalog
    }

    /// Seeded vocabulary, no movies.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("movies.db");

        let conn = open_shared(&db_path).expect("Failed to open test database");
        let vocabulary = Arc::new(
            VocabularyStore::new(conn.clone(), true).expect("Failed to open vocabulary"),
        );
        let catalog =
            Arc::new(SqliteCatalogStore::new(conn).expect("Failed to open catalog store"));
        let recommender = Recommender::new(vocabulary.clone(), catalog.clone())
            .with_current_year(CURRENT_YEAR);

        Self {
            recommender,
            vocabulary,
            catalog,
            db_path,
            temp_dir,
        }
    }

    /// Write a comedy row with direct SQL, bypassing the typed insert path,
    /// so columns can hold values of the wrong type.
    pub fn insert_raw_comedy(&self, title: &str, release_year: &str, vote_count: &str) {
        let conn = Connection::open(&self.db_path).expect("Failed to open test database");
        conn.execute(
            "INSERT INTO movies
             (title, overview, release_year, genres, vote_average, vote_count, popularity)
             VALUES (?1, NULL, ?2, 'Comédie', 7.0, ?3, 5.0)",
            params![title, release_year, vote_count],
        )
        .expect("Failed to insert raw movie");
    }

    /// Classify `word` with direct SQL, as another process sharing the
    /// database would. The running stores only see it after a reload.
    pub fn insert_raw_vocabulary_word(&self, word: &str, category: &str, subcategory: &str) {
        let conn = Connection::open(&self.db_path).expect("Failed to open test database");
        conn.execute(
            "INSERT OR REPLACE INTO significant_words (word, category, subcategory, weight)
             VALUES (?1, ?2, ?3, 1)",
            params![word, category, subcategory],
        )
        .expect("Failed to insert raw vocabulary word");
    }
}
