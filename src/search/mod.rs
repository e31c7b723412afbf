mod filters;
mod format;
mod normalizer;
mod query;
mod ranking;
mod recommender;
mod response;
mod signals;

pub use filters::{FilterExtractor, Mood, Period, QueryFilters, SortBy};
pub use format::{format_record, truncate_description, MovieDisplay, OrUnavailable, UNAVAILABLE};
pub use normalizer::{word_tokens, SignificantWords};
pub(crate) use query::escape_like;
pub use query::{Clause, Column, Predicate, QueryPlan, QueryPlanner, RenderedQuery, RESULT_LIMIT};
pub use ranking::{weighted_score, WEIGHTED_SCORE_SQL};
pub use recommender::{Recommendation, Recommender};
pub use response::{render_card, render_response, response_intro, score_label, NO_RESULTS};
pub use signals::{detect_mood, detect_period, detect_quality, QualitySignal};
