//! Catalog data models.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A movie as written into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Comma-joined genre names.
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

pub fn split_genres(genres: &str) -> Vec<String> {
    genres
        .split(',')
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}

/// A row returned by a recommendation query, exactly as stored.
///
/// Fields keep their raw SQLite values so one badly typed column does not
/// make the whole row unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub title: Value,
    pub overview: Value,
    pub release_year: Value,
    pub genres: Value,
    pub vote_average: Value,
    pub vote_count: Value,
    pub popularity: Value,
    pub weighted_score: Value,
}

/// The movie a title fragment resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub title: String,
    pub genres: Option<String>,
}

impl TitleMatch {
    /// Genre names, trimmed, in catalog order.
    pub fn genre_list(&self) -> Vec<String> {
        split_genres(self.genres.as_deref().unwrap_or_default())
    }
}

/// One line of the catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub title: String,
    pub release_year: Option<i64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
}

/// One page of the catalog listing, ordered by title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    /// 1-based, clamped to `1..=total_pages`.
    pub page: usize,
    /// Never below 1, even for an empty catalog.
    pub total_pages: usize,
    pub total_movies: usize,
    pub movies: Vec<MovieSummary>,
}

/// Name of a SQLite value's storage class.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Integer(_) => "integer",
        Value::Real(_) => "real",
        Value::Text(_) => "text",
        Value::Blob(_) => "blob",
    }
}

/// Read a value as text. Numbers are rendered, blobs are rejected.
pub(crate) fn value_as_text(value: &Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Text(s) => Ok(Some(s.clone())),
        Value::Integer(i) => Ok(Some(i.to_string())),
        Value::Real(f) => Ok(Some(f.to_string())),
        Value::Blob(_) => Err(type_name(value)),
    }
}

/// Read a value as an integer, accepting whole reals and numeric text.
pub(crate) fn value_as_integer(value: &Value) -> Result<Option<i64>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i)),
        Value::Real(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(*f as i64)),
        Value::Text(s) => s.trim().parse().map(Some).map_err(|_| type_name(value)),
        _ => Err(type_name(value)),
    }
}

/// Read a value as a float, accepting integers and numeric text.
pub(crate) fn value_as_real(value: &Value) -> Result<Option<f64>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::Real(f) => Ok(Some(*f)),
        Value::Integer(i) => Ok(Some(*i as f64)),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or(type_name(value)),
        Value::Blob(_) => Err(type_name(value)),
    }
}

/// Read one field of `record_title` with `read`. A value of the wrong type
/// is logged and treated as missing.
pub(crate) fn read_field<T>(
    record_title: &str,
    field: &str,
    value: &Value,
    read: fn(&Value) -> Result<Option<T>, &'static str>,
) -> Option<T> {
    match read(value) {
        Ok(v) => v,
        Err(found) => {
            warn!(
                "Malformed field '{}' for movie '{}': found {}",
                field, record_title, found
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_genres() {
        assert_eq!(
            split_genres("Action, Science Fiction,,  Thriller "),
            vec!["Action", "Science Fiction", "Thriller"]
        );
        assert!(split_genres("").is_empty());
    }

    #[test]
    fn test_title_match_genre_list() {
        let found = TitleMatch {
            title: "Heat".to_string(),
            genres: Some("Crime, Action".to_string()),
        };
        assert_eq!(found.genre_list(), vec!["Crime", "Action"]);

        let bare = TitleMatch {
            title: "Untitled".to_string(),
            genres: None,
        };
        assert!(bare.genre_list().is_empty());
    }

    #[test]
    fn test_lenient_value_reads() {
        assert_eq!(value_as_integer(&Value::Text(" 1999".into())), Ok(Some(1999)));
        assert_eq!(value_as_integer(&Value::Real(2001.0)), Ok(Some(2001)));
        assert_eq!(value_as_integer(&Value::Real(2001.5)), Err("real"));
        assert_eq!(value_as_integer(&Value::Text("soon".into())), Err("text"));

        assert_eq!(value_as_real(&Value::Integer(7)), Ok(Some(7.0)));
        assert_eq!(value_as_real(&Value::Text("nan".into())), Err("text"));
        assert_eq!(value_as_real(&Value::Null), Ok(None));

        assert_eq!(value_as_text(&Value::Integer(42)), Ok(Some("42".to_string())));
        assert_eq!(value_as_text(&Value::Blob(vec![0xff])), Err("blob"));
    }
}
