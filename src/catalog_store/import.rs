//! Loading movies from a JSON import file.

use super::models::CatalogRecord;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogImportError {
    #[error("Failed to read import file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid import file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Movie at index {index} has no title")]
    MissingTitle { index: usize },
}

/// `genres` may be given already joined or as a list of names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenresField {
    Joined(String),
    List(Vec<String>),
}

impl GenresField {
    fn joined(self) -> Option<String> {
        let joined = match self {
            GenresField::Joined(s) => s.trim().to_string(),
            GenresField::List(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };
        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Deserialize)]
struct ImportedMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    release_year: Option<i32>,
    #[serde(default)]
    genres: Option<GenresField>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    vote_count: Option<i64>,
    #[serde(default)]
    popularity: Option<f64>,
}

/// Parse a JSON array of movies. The whole input is rejected on the first
/// invalid entry.
pub fn parse_import(json: &str) -> Result<Vec<CatalogRecord>, CatalogImportError> {
    let movies: Vec<ImportedMovie> = serde_json::from_str(json)?;
    movies
        .into_iter()
        .enumerate()
        .map(|(index, movie)| {
            let title = movie
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or(CatalogImportError::MissingTitle { index })?;
            Ok(CatalogRecord {
                title,
                overview: movie.overview,
                release_year: movie.release_year,
                genres: movie.genres.and_then(GenresField::joined),
                vote_average: movie.vote_average,
                vote_count: movie.vote_count,
                popularity: movie.popularity,
            })
        })
        .collect()
}

pub fn load_import_file(path: &Path) -> Result<Vec<CatalogRecord>, CatalogImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_import(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_genres_as_string_or_list() {
        let records = parse_import(
            r#"[
                {"title": "Heat", "release_year": 1995, "genres": "Crime, Thriller",
                 "vote_average": 7.9, "vote_count": 6000, "popularity": 40.5,
                 "overview": "A heist."},
                {"title": " Up ", "genres": ["Animation", " ", "Family"]},
                {"title": "Nothing", "genres": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].genres.as_deref(), Some("Crime, Thriller"));
        assert_eq!(records[0].vote_count, Some(6000));
        assert_eq!(records[1].title, "Up");
        assert_eq!(records[1].genres.as_deref(), Some("Animation, Family"));
        assert_eq!(records[1].release_year, None);
        assert_eq!(records[2].genres, None);
    }

    #[test]
    fn test_missing_title_rejects_the_file() {
        let err = parse_import(r#"[{"title": "Heat"}, {"overview": "no title"}]"#).unwrap_err();
        assert!(matches!(err, CatalogImportError::MissingTitle { index: 1 }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_import(r#"{"title": "not an array"}"#),
            Err(CatalogImportError::Parse(_))
        ));
        assert!(matches!(
            parse_import(r#"[{"title": "Heat", "vote_count": "many"}]"#),
            Err(CatalogImportError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Heat", "release_year": 1995}}]"#).unwrap();

        let records = load_import_file(file.path()).unwrap();
        assert_eq!(records[0].release_year, Some(1995));

        let missing = load_import_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(CatalogImportError::Io { .. })));
    }
}
