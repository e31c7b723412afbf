//! CatalogStore trait definition.

use super::models::{CatalogPage, CatalogRecord, RankedRecord, TitleMatch};
use crate::search::RenderedQuery;
use anyhow::Result;

/// Read and write access to the movie catalog.
pub trait CatalogStore: Send + Sync {
    /// Number of movies in the catalog.
    fn count_movies(&self) -> Result<usize>;

    /// Run a rendered recommendation query.
    fn run_query(&self, query: &RenderedQuery) -> Result<Vec<RankedRecord>>;

    /// First movie whose title contains `fragment`, ignoring case.
    /// An exact title match is preferred.
    fn find_by_title(&self, fragment: &str) -> Result<Option<TitleMatch>>;

    /// One page of the catalog ordered by title. Out of range pages are
    /// clamped.
    fn list_movies(&self, page: usize, page_size: usize) -> Result<CatalogPage>;

    /// Write `records` in a single transaction, replacing movies with the
    /// same title and release year. Returns the number written.
    fn insert_movies(&self, records: &[CatalogRecord]) -> Result<usize>;
}
