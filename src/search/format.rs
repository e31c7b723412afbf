//! Display-ready movie records.

use crate::catalog_store::{
    read_field, value_as_integer, value_as_real, value_as_text, RankedRecord,
};
use serde::Serialize;
use std::fmt;

pub const DESCRIPTION_MAX_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// A recommendation ready to show.
///
/// `None` marks a field that was missing or unreadable in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDisplay {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub genres: Option<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<i64>,
    pub popularity: Option<f64>,
    pub description: Option<String>,
    pub weighted_score: Option<f64>,
}

/// Shown in place of an unavailable field.
pub const UNAVAILABLE: &str = "N/A";

/// Formats an optional field, falling back to [`UNAVAILABLE`].
pub struct OrUnavailable<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnavailable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(UNAVAILABLE),
        }
    }
}

/// Cut `text` to at most 200 characters, ending in "..." when shortened.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }
    let keep = DESCRIPTION_MAX_CHARS - ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Map a raw catalog row to a [`MovieDisplay`]. Never fails: unreadable
/// fields become unavailable and are logged.
pub fn format_record(record: &RankedRecord) -> MovieDisplay {
    let title = read_field("?", "title", &record.title, value_as_text);
    let label = title.as_deref().unwrap_or("?");

    MovieDisplay {
        year: read_field(label, "release_year", &record.release_year, value_as_integer),
        genres: read_field(label, "genres", &record.genres, value_as_text),
        rating: read_field(label, "vote_average", &record.vote_average, value_as_real),
        vote_count: read_field(label, "vote_count", &record.vote_count, value_as_integer),
        popularity: read_field(label, "popularity", &record.popularity, value_as_real),
        description: read_field(label, "overview", &record.overview, value_as_text)
            .map(|d| truncate_description(&d)),
        weighted_score: read_field(
            label,
            "weighted_score",
            &record.weighted_score,
            value_as_real,
        ),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::Value;

    fn raw(title: Value, year: Value, score: Value) -> RankedRecord {
        RankedRecord {
            title,
            overview: Value::Text("Short.".to_string()),
            release_year: year,
            genres: Value::Text("Drama".to_string()),
            vote_average: Value::Real(7.5),
            vote_count: Value::Integer(1200),
            popularity: Value::Real(33.0),
            weighted_score: score,
        }
    }

    #[test]
    fn test_truncate_long_description() {
        let text = "a".repeat(250);
        let out = truncate_description(&text);
        assert_eq!(out.chars().count(), 200);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..197], &text[..197]);
    }

    #[test]
    fn test_short_description_is_untouched() {
        let text = "é".repeat(200);
        assert_eq!(truncate_description(&text), text);
        let longer = "é".repeat(201);
        let out = truncate_description(&longer);
        assert_eq!(out.chars().count(), 200);
        assert!(out.starts_with("ééé"));
    }

    #[test]
    fn test_format_well_formed_record() {
        let display = format_record(&raw(
            Value::Text("Heat".to_string()),
            Value::Integer(1995),
            Value::Real(9.33),
        ));
        assert_eq!(display.title.as_deref(), Some("Heat"));
        assert_eq!(display.year, Some(1995));
        assert_eq!(display.genres.as_deref(), Some("Drama"));
        assert_eq!(display.rating, Some(7.5));
        assert_eq!(display.vote_count, Some(1200));
        assert_eq!(display.description.as_deref(), Some("Short."));
        assert_eq!(display.weighted_score, Some(9.33));
    }

    #[test]
    fn test_bad_fields_become_unavailable() {
        let display = format_record(&raw(
            Value::Blob(vec![1, 2, 3]),
            Value::Text("unknown".to_string()),
            Value::Null,
        ));
        assert_eq!(display.title, None);
        assert_eq!(display.year, None);
        assert_eq!(display.weighted_score, None);
        // The other fields are still read.
        assert_eq!(display.rating, Some(7.5));
        assert_eq!(format!("{}", OrUnavailable(&display.year)), "N/A");
        assert_eq!(format!("{}", OrUnavailable(&display.rating)), "7.5");
    }
}
