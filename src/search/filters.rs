//! Structured filters extracted from a free-form request.

use super::normalizer::{word_tokens, SignificantWords};
use super::signals::{detect_mood, detect_period, detect_quality, QualitySignal};
use crate::vocabulary::{Category, Vocabulary};
use chrono::{Datelike, Local};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref YEAR_PATTERNS: [Regex; 4] = [
        Regex::new(r"de ([0-9]{4})").unwrap(),
        Regex::new(r"en ([0-9]{4})").unwrap(),
        Regex::new(r"année ([0-9]{4})").unwrap(),
        Regex::new(r"([0-9]{4})").unwrap(),
    ];
}

pub const MIN_YEAR: i32 = 1900;
pub const ACCLAIMED_RATING_MIN: f64 = 7.0;
pub const UNDER_THE_RADAR_RATING_MIN: f64 = 6.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    #[serde(rename = "intense")]
    Intense,
    #[serde(rename = "léger")]
    Light,
    #[serde(rename = "sérieux")]
    Serious,
    #[serde(rename = "émotionnel")]
    Emotional,
    #[serde(rename = "effrayant")]
    Scary,
    #[serde(rename = "mystérieux")]
    Mysterious,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Intense => "intense",
            Mood::Light => "léger",
            Mood::Serious => "sérieux",
            Mood::Emotional => "émotionnel",
            Mood::Scary => "effrayant",
            Mood::Mysterious => "mystérieux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    #[serde(rename = "recent")]
    Recent,
    #[serde(rename = "classique")]
    Classic,
    #[serde(rename = "moderne")]
    Modern,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Recent => "recent",
            Period::Classic => "classique",
            Period::Modern => "moderne",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    WeightedScore,
    Popularity,
    Rating,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortBy::WeightedScore => "weighted_score",
            SortBy::Popularity => "popularity",
            SortBy::Rating => "rating",
        };
        write!(f, "{}", s)
    }
}

/// Everything understood from one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryFilters {
    /// Genre subcategories, first-seen order, no duplicates.
    pub genres: Vec<String>,
    /// Theme subcategories, first-seen order, no duplicates.
    pub themes: Vec<String>,
    pub mood: Option<Mood>,
    pub period: Option<Period>,
    pub year: Option<i32>,
    pub rating_min: Option<f64>,
    pub sort_by: SortBy,
    /// Every vocabulary word matched, repeats included.
    pub keywords: Vec<String>,
    pub prefer_unknown: bool,
}

impl QueryFilters {
    pub fn is_unconstrained(&self) -> bool {
        self.genres.is_empty()
            && self.themes.is_empty()
            && self.year.is_none()
            && self.period.is_none()
            && self.rating_min.is_none()
    }
}

/// Turns request text into [`QueryFilters`].
#[derive(Debug, Clone, Copy)]
pub struct FilterExtractor {
    current_year: i32,
}

impl Default for FilterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterExtractor {
    pub fn new() -> Self {
        Self::with_current_year(Local::now().year())
    }

    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// First plausible year mentioned in `text`.
    ///
    /// Each pattern is tried once, in order; its first match is kept only if it
    /// falls between 1900 and the current year.
    pub fn extract_year(&self, text: &str) -> Option<i32> {
        let text = text.to_lowercase();
        YEAR_PATTERNS.iter().find_map(|pattern| {
            let year: i32 = pattern.captures(&text)?.get(1)?.as_str().parse().ok()?;
            (MIN_YEAR..=self.current_year).contains(&year).then_some(year)
        })
    }

    pub fn extract(&self, raw: &str, vocabulary: &Vocabulary) -> QueryFilters {
        let significant = SignificantWords::new(raw, vocabulary.stop_words());
        let mut filters = QueryFilters {
            year: self.extract_year(significant.text()),
            ..Default::default()
        };

        for entry in vocabulary.classify(&significant) {
            let bucket = match entry.category {
                Category::Genre => &mut filters.genres,
                Category::Theme => &mut filters.themes,
            };
            if !bucket.contains(&entry.subcategory) {
                bucket.push(entry.subcategory.clone());
            }
            filters.keywords.push(entry.word.clone());
        }

        let tokens = word_tokens(significant.text());
        filters.mood = detect_mood(&tokens);
        filters.period = detect_period(&tokens);

        match detect_quality(&tokens) {
            Some(QualitySignal::Popular) => filters.sort_by = SortBy::Popularity,
            Some(QualitySignal::Acclaimed) => {
                filters.sort_by = SortBy::Rating;
                filters.rating_min = Some(ACCLAIMED_RATING_MIN);
            }
            Some(QualitySignal::UnderTheRadar) => {
                filters.prefer_unknown = true;
                filters.rating_min = Some(UNDER_THE_RADAR_RATING_MIN);
            }
            None => {}
        }

        filters
    }
}
