//! The request pipeline: text in, ranked and formatted movies out.

use super::filters::{FilterExtractor, QueryFilters};
use super::format::{format_record, MovieDisplay};
use super::query::{QueryPlan, QueryPlanner};
use super::response::render_response;
use crate::catalog_store::CatalogStore;
use crate::vocabulary::{Vocabulary, VocabularyStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Result of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub filters: QueryFilters,
    pub movies: Vec<MovieDisplay>,
}

impl Recommendation {
    pub fn render(&self) -> String {
        render_response(&self.filters, &self.movies)
    }
}

pub struct Recommender {
    vocabulary: Arc<VocabularyStore>,
    catalog: Arc<dyn CatalogStore>,
    extractor: FilterExtractor,
    planner: QueryPlanner,
}

impl Recommender {
    pub fn new(vocabulary: Arc<VocabularyStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        let extractor = FilterExtractor::new();
        Self {
            vocabulary,
            catalog,
            extractor,
            planner: QueryPlanner::new(extractor.current_year()),
        }
    }

    /// Pin "now" to `current_year`, for reproducible year and period handling.
    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.extractor = FilterExtractor::with_current_year(current_year);
        self.planner = QueryPlanner::new(current_year);
        self
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    pub fn catalog(&self) -> &dyn CatalogStore {
        self.catalog.as_ref()
    }

    /// Filters understood from `request`, without searching.
    pub fn analyze(&self, request: &str) -> QueryFilters {
        self.extractor.extract(request, &self.vocabulary.snapshot())
    }

    pub fn plan(&self, filters: &QueryFilters, vocabulary: &Vocabulary) -> QueryPlan {
        self.planner.plan(filters, vocabulary)
    }

    /// Run `plan` against the catalog. Storage failures are logged and yield
    /// no movies.
    pub fn execute(&self, plan: &QueryPlan) -> Vec<MovieDisplay> {
        let rendered = plan.render();
        debug!("Executing: {} with {:?}", rendered.sql, rendered.params);
        match self.catalog.run_query(&rendered) {
            Ok(rows) => {
                info!("Found {} movies", rows.len());
                rows.iter().map(format_record).collect()
            }
            Err(err) => {
                error!("Movie search failed: {:#}", err);
                Vec::new()
            }
        }
    }

    pub fn recommend(&self, request: &str) -> Recommendation {
        let started = Instant::now();
        info!("New request: {}", request);

        // One snapshot for the whole request.
        let vocabulary = self.vocabulary.snapshot();

        let stage = Instant::now();
        let filters = self.extractor.extract(request, &vocabulary);
        info!("Extracted filters: {:?}", filters);
        debug!("Analysis took {:?}", stage.elapsed());

        let stage = Instant::now();
        let plan = self.planner.plan(&filters, &vocabulary);
        let movies = self.execute(&plan);
        debug!("Search took {:?}", stage.elapsed());

        info!("Request handled in {:?}", started.elapsed());
        Recommendation { filters, movies }
    }

    /// Movies sharing a genre with the first title matching `title`.
    pub fn similar(&self, title: &str) -> Vec<MovieDisplay> {
        let reference = match self.catalog.find_by_title(title) {
            Ok(Some(reference)) => reference,
            Ok(None) => {
                info!("No movie matches '{}'", title);
                return Vec::new();
            }
            Err(err) => {
                error!("Title lookup failed: {:#}", err);
                return Vec::new();
            }
        };
        match self
            .planner
            .plan_similar(&reference.title, &reference.genre_list())
        {
            Some(plan) => self.execute(&plan),
            None => {
                info!("'{}' has no genres to compare", reference.title);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{
        CatalogPage, CatalogRecord, RankedRecord, SqliteCatalogStore, TitleMatch,
    };
    use crate::search::filters::SortBy;
    use crate::search::query::RenderedQuery;
    use crate::sqlite_persistence::open_shared_in_memory;
    use anyhow::{bail, Result};

    struct BrokenCatalog;

    impl CatalogStore for BrokenCatalog {
        fn count_movies(&self) -> Result<usize> {
            bail!("disk on fire")
        }
        fn run_query(&self, _query: &RenderedQuery) -> Result<Vec<RankedRecord>> {
            bail!("disk on fire")
        }
        fn find_by_title(&self, _fragment: &str) -> Result<Option<TitleMatch>> {
            bail!("disk on fire")
        }
        fn list_movies(&self, _page: usize, _page_size: usize) -> Result<CatalogPage> {
            bail!("disk on fire")
        }
        fn insert_movies(&self, _records: &[CatalogRecord]) -> Result<usize> {
            bail!("disk on fire")
        }
    }

    fn movie(title: &str, year: i32, genres: &str, average: f64, count: i64, pop: f64) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            overview: Some(format!("{} overview", title)),
            release_year: Some(year),
            genres: Some(genres.to_string()),
            vote_average: Some(average),
            vote_count: Some(count),
            popularity: Some(pop),
        }
    }

    fn recommender() -> Recommender {
        let conn = open_shared_in_memory().unwrap();
        let vocabulary = Arc::new(VocabularyStore::new(conn.clone(), true).unwrap());
        let catalog = Arc::new(SqliteCatalogStore::new(conn).unwrap());
        catalog
            .insert_movies(&[
                movie("Die Hard", 1988, "Action, Thriller", 7.8, 9000, 40.0),
                movie("Heat", 1995, "Crime, Action", 7.9, 6000, 35.0),
                movie("Amélie", 2001, "Comedy, Romance", 7.9, 10000, 30.0),
                movie("Airplane!", 1980, "Comédie", 7.2, 3000, 90.0),
                movie("Obscure", 2010, "Action", 6.8, 40, 2.0),
            ])
            .unwrap();
        Recommender::new(vocabulary, catalog).with_current_year(2025)
    }

    fn titles(movies: &[MovieDisplay]) -> Vec<&str> {
        movies.iter().filter_map(|m| m.title.as_deref()).collect()
    }

    #[test]
    fn test_genre_request_ranks_by_weighted_score() {
        let result = recommender().recommend("un film d'action");
        assert_eq!(result.filters.genres, vec!["action"]);
        assert_eq!(result.filters.sort_by, SortBy::WeightedScore);
        assert_eq!(titles(&result.movies), vec!["Die Hard", "Heat", "Obscure"]);
    }

    #[test]
    fn test_popular_request_orders_by_popularity() {
        let result = recommender().recommend("quelque chose de populaire");
        assert_eq!(result.filters.sort_by, SortBy::Popularity);
        assert_eq!(titles(&result.movies)[0], "Airplane!");
    }

    #[test]
    fn test_year_request() {
        let result = recommender().recommend("une comédie de 1980");
        assert_eq!(titles(&result.movies), vec!["Airplane!"]);
        assert!(result.render().contains("🎬 Airplane! (1980)"));
    }

    #[test]
    fn test_storage_failure_yields_no_results() {
        let conn = open_shared_in_memory().unwrap();
        let vocabulary = Arc::new(VocabularyStore::new(conn, true).unwrap());
        let recommender = Recommender::new(vocabulary, Arc::new(BrokenCatalog));

        let result = recommender.recommend("action");
        assert_eq!(result.filters.genres, vec!["action"]);
        assert!(result.movies.is_empty());
        assert!(recommender.similar("Heat").is_empty());
    }

    #[test]
    fn test_similar_excludes_reference() {
        let recommender = recommender();
        let similar = recommender.similar("heat");
        assert_eq!(titles(&similar), vec!["Die Hard", "Obscure"]);
        assert!(recommender.similar("Nope").is_empty());
    }

    #[test]
    fn test_new_vocabulary_word_is_used_by_later_requests() {
        let recommender = recommender();
        assert!(recommender.analyze("un film de flingues").genres.is_empty());

        recommender
            .vocabulary()
            .add_vocabulary_word("flingues", "genre", "action")
            .unwrap();
        let result = recommender.recommend("un film de flingues");
        assert_eq!(result.filters.genres, vec!["action"]);
        assert_eq!(result.movies.len(), 3);
    }
}
