//! Predicate builder and query planner.
//!
//! Filters compile into a conjunction of typed clauses that render into SQL
//! with positional parameters. Nothing here touches a database.

use super::filters::{Period, QueryFilters, SortBy};
use super::ranking::{order_expression, WEIGHTED_SCORE_SQL};
use crate::vocabulary::{Category, Vocabulary};
use rusqlite::types::Value;

/// Maximum number of recommendations returned per request.
pub const RESULT_LIMIT: usize = 5;

/// Years back from now that still count as "recent".
pub const RECENT_WINDOW_YEARS: i32 = 2;
/// Years back from now before which a movie counts as "classic".
pub const CLASSIC_AGE_YEARS: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Overview,
    ReleaseYear,
    Genres,
    VoteAverage,
    VoteCount,
    Popularity,
}

impl Column {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Overview => "overview",
            Column::ReleaseYear => "release_year",
            Column::Genres => "genres",
            Column::VoteAverage => "vote_average",
            Column::VoteCount => "vote_count",
            Column::Popularity => "popularity",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Equals(Column, Value),
    NotEquals(Column, Value),
    AtLeast(Column, Value),
    AtMost(Column, Value),
    /// Case-insensitive substring match of any needle in any of the columns.
    ContainsAny {
        columns: Vec<Column>,
        needles: Vec<String>,
    },
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Clause {
    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Clause::Equals(column, value) => {
                params.push(value.clone());
                format!("{} = ?", column.as_sql())
            }
            Clause::NotEquals(column, value) => {
                params.push(value.clone());
                format!("{} != ?", column.as_sql())
            }
            Clause::AtLeast(column, value) => {
                params.push(value.clone());
                format!("{} >= ?", column.as_sql())
            }
            Clause::AtMost(column, value) => {
                params.push(value.clone());
                format!("{} <= ?", column.as_sql())
            }
            Clause::ContainsAny { columns, needles } => {
                if columns.is_empty() || needles.is_empty() {
                    return "0".to_string();
                }
                let alternatives: Vec<String> = needles
                    .iter()
                    .map(|needle| {
                        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
                        let tests: Vec<String> = columns
                            .iter()
                            .map(|column| {
                                params.push(Value::Text(pattern.clone()));
                                format!("LOWER({}) LIKE ? ESCAPE '\\'", column.as_sql())
                            })
                            .collect();
                        if tests.len() == 1 {
                            tests.join("")
                        } else {
                            format!("({})", tests.join(" OR "))
                        }
                    })
                    .collect();
                format!("({})", alternatives.join(" OR "))
            }
        }
    }
}

/// Conjunction of clauses. Empty means "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn render(&self, params: &mut Vec<Value>) -> String {
        if self.clauses.is_empty() {
            return "1 = 1".to_string();
        }
        self.clauses
            .iter()
            .map(|c| c.render(params))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// SQL text plus its positional parameters, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicate: Predicate,
    pub sort_by: SortBy,
    pub limit: usize,
}

impl QueryPlan {
    pub fn render(&self) -> RenderedQuery {
        let mut params = Vec::new();
        let where_clause = self.predicate.render(&mut params);
        params.push(Value::Integer(self.limit as i64));
        let sql = format!(
            "SELECT title, overview, release_year, genres, vote_average, vote_count, popularity, \
             {} AS weighted_score \
             FROM movies \
             WHERE {} \
             ORDER BY {} DESC, title ASC \
             LIMIT ?",
            WEIGHTED_SCORE_SQL,
            where_clause,
            order_expression(self.sort_by)
        );
        RenderedQuery { sql, params }
    }
}

/// Compiles [`QueryFilters`] into a [`QueryPlan`].
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner {
    current_year: i32,
    limit: usize,
}

impl QueryPlanner {
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            limit: RESULT_LIMIT,
        }
    }

    pub fn plan(&self, filters: &QueryFilters, vocabulary: &Vocabulary) -> QueryPlan {
        let mut predicate = Predicate::default();

        if !filters.genres.is_empty() {
            predicate.push(Clause::ContainsAny {
                columns: vec![Column::Genres],
                needles: filters.genres.clone(),
            });
        }

        let mut theme_words: Vec<String> = Vec::new();
        for theme in &filters.themes {
            for word in vocabulary.words_for(Category::Theme, theme) {
                if !theme_words.iter().any(|w| w == word) {
                    theme_words.push(word.to_string());
                }
            }
        }
        if !theme_words.is_empty() {
            predicate.push(Clause::ContainsAny {
                columns: vec![Column::Overview, Column::Title],
                needles: theme_words,
            });
        }

        if let Some(year) = filters.year {
            predicate.push(Clause::Equals(
                Column::ReleaseYear,
                Value::Integer(year.into()),
            ));
        } else {
            match filters.period {
                Some(Period::Recent) => predicate.push(Clause::AtLeast(
                    Column::ReleaseYear,
                    Value::Integer((self.current_year - RECENT_WINDOW_YEARS).into()),
                )),
                Some(Period::Classic) => predicate.push(Clause::AtMost(
                    Column::ReleaseYear,
                    Value::Integer((self.current_year - CLASSIC_AGE_YEARS).into()),
                )),
                Some(Period::Modern) | None => {}
            }
        }

        if let Some(rating_min) = filters.rating_min {
            predicate.push(Clause::AtLeast(Column::VoteAverage, Value::Real(rating_min)));
        }

        QueryPlan {
            predicate,
            sort_by: filters.sort_by,
            limit: self.limit,
        }
    }

    /// Movies sharing any of `genres`, other than `title`, by weighted score.
    pub fn plan_similar(&self, title: &str, genres: &[String]) -> Option<QueryPlan> {
        let needles: Vec<String> = genres
            .iter()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        if needles.is_empty() {
            return None;
        }
        let mut predicate = Predicate::default();
        predicate.push(Clause::ContainsAny {
            columns: vec![Column::Genres],
            needles,
        });
        predicate.push(Clause::NotEquals(
            Column::Title,
            Value::Text(title.to_string()),
        ));
        Some(QueryPlan {
            predicate,
            sort_by: SortBy::WeightedScore,
            limit: self.limit,
        })
    }
}
