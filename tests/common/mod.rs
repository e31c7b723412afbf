//! Common test infrastructure
//!
//! Every end-to-end test starts from a `TestCatalog`: a seeded vocabulary and
//! a small movie catalog in a temporary database file, with the clock pinned
//! to `CURRENT_YEAR`.
//!
//! ```no_run
//! mod common;
//! use common::{TestCatalog, TITLE_DINNER};
//!
//! #[test]
//! fn test_comedy() {
//!     let catalog = TestCatalog::new();
//!     let recommendation = catalog.recommender.recommend("une comédie");
//!     assert!(!recommendation.movies.is_empty());
//! }
//! ```

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::TestCatalog;

#[allow(unused_imports)]
pub(crate) use fixtures::{test_movies, titles};
