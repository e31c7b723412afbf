//! Weighted relevance score.
//!
//! The score rewards well-rated movies with many votes and adds a small
//! popularity bonus. It is not normalized: heavily voted titles go well past
//! 10, so it is only meaningful for ordering.

use super::filters::SortBy;

/// SQL rendering of [`weighted_score`] over the `movies` columns.
pub const WEIGHTED_SCORE_SQL: &str =
    "(vote_average * (CAST(vote_count AS REAL) / 1000.0) + popularity / 100.0)";

pub fn weighted_score(vote_average: f64, vote_count: i64, popularity: f64) -> f64 {
    vote_average * (vote_count as f64 / 1000.0) + popularity / 100.0
}

/// Expression a result set is ordered by, descending.
pub fn order_expression(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::WeightedScore => "weighted_score",
        SortBy::Popularity => "popularity",
        SortBy::Rating => "vote_average",
    }
}
