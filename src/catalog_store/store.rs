//! SQLite-backed catalog store.

use super::models::{
    read_field, value_as_integer, value_as_real, value_as_text, CatalogPage, CatalogRecord,
    MovieSummary, RankedRecord, TitleMatch,
};
use super::schema::CATALOG_SCHEMA;
use super::trait_def::CatalogStore;
use crate::search::escape_like;
use crate::search::RenderedQuery;
use crate::sqlite_persistence::SharedConnection;
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, types::Value, OptionalExtension};
use tracing::{debug, info};

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: SharedConnection,
}

impl SqliteCatalogStore {
    /// Open the catalog on `conn`, creating the `movies` table if needed.
    pub fn new(conn: SharedConnection) -> Result<Self> {
        {
            let mut locked = conn.lock().unwrap();
            let version = CATALOG_SCHEMA
                .apply(&mut locked)
                .context("Failed to initialize catalog schema")?;
            debug!("Catalog schema at version {}", version);
        }
        Ok(Self { conn })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn count_movies(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn run_query(&self, query: &RenderedQuery) -> Result<Vec<RankedRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&query.sql)
            .with_context(|| format!("Failed to prepare query: {}", query.sql))?;
        let rows = stmt.query_map(params_from_iter(query.params.iter()), |row| {
            Ok(RankedRecord {
                title: row.get::<_, Value>(0)?,
                overview: row.get::<_, Value>(1)?,
                release_year: row.get::<_, Value>(2)?,
                genres: row.get::<_, Value>(3)?,
                vote_average: row.get::<_, Value>(4)?,
                vote_count: row.get::<_, Value>(5)?,
                popularity: row.get::<_, Value>(6)?,
                weighted_score: row.get::<_, Value>(7)?,
            })
        })?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn find_by_title(&self, fragment: &str) -> Result<Option<TitleMatch>> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let conn = self.conn.lock().unwrap();
        let found = conn
            .query_row(
                "SELECT title, genres FROM movies
                 WHERE LOWER(title) LIKE ?1 ESCAPE '\\'
                 ORDER BY (LOWER(title) = ?2) DESC, title ASC
                 LIMIT 1",
                params![format!("%{}%", escape_like(&needle)), needle],
                |row| {
                    Ok(TitleMatch {
                        title: row.get(0)?,
                        genres: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    fn list_movies(&self, page: usize, page_size: usize) -> Result<CatalogPage> {
        let page_size = page_size.max(1);
        let total_movies = self.count_movies()?;
        let total_pages = total_movies.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        let offset = (page - 1) * page_size;

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT title, release_year, vote_average, vote_count
             FROM movies
             ORDER BY title
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt
            .query_map(params![page_size as i64, offset as i64], |row| {
                Ok((
                    row.get::<_, Value>(0)?,
                    row.get::<_, Value>(1)?,
                    row.get::<_, Value>(2)?,
                    row.get::<_, Value>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let movies = rows
            .iter()
            .map(|(title, release_year, vote_average, vote_count)| {
                let title = read_field("?", "title", title, value_as_text).unwrap_or_default();
                MovieSummary {
                    release_year: read_field(&title, "release_year", release_year, value_as_integer),
                    vote_average: read_field(&title, "vote_average", vote_average, value_as_real),
                    vote_count: read_field(&title, "vote_count", vote_count, value_as_integer),
                    title,
                }
            })
            .collect();

        Ok(CatalogPage {
            page,
            total_pages,
            total_movies,
            movies,
        })
    }

    fn insert_movies(&self, records: &[CatalogRecord]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut delete = tx.prepare(
                "DELETE FROM movies WHERE title = ?1 AND release_year IS ?2",
            )?;
            let mut insert = tx.prepare(
                "INSERT INTO movies
                 (title, overview, release_year, genres, vote_average, vote_count, popularity)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for record in records {
                delete.execute(params![record.title, record.release_year])?;
                insert
                    .execute(params![
                        record.title,
                        record.overview,
                        record.release_year,
                        record.genres,
                        record.vote_average,
                        record.vote_count,
                        record.popularity,
                    ])
                    .with_context(|| format!("Failed to insert movie '{}'", record.title))?;
            }
        }
        tx.commit()?;
        info!("Wrote {} movies to the catalog", records.len());
        Ok(records.len())
    }
}
