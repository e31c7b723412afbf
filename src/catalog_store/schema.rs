//! Schema definition for the movie catalog.
//!
//! Only the seven columns read by the recommender are required; catalogs
//! produced by other tools may carry extra columns.

use crate::sqlite_persistence::{SchemaComponent, VersionedSchema};

pub const CATALOG_SCHEMA: SchemaComponent = SchemaComponent {
    name: "catalog",
    versions: &[
        VersionedSchema {
            version: 1,
            up: r#"
                CREATE TABLE IF NOT EXISTS movies (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    overview TEXT,
                    release_year INTEGER,
                    genres TEXT,
                    vote_average REAL,
                    vote_count INTEGER,
                    popularity REAL
                );
            "#,
        },
        VersionedSchema {
            version: 2,
            up: r#"
                CREATE INDEX IF NOT EXISTS idx_vote_average ON movies(vote_average);
                CREATE INDEX IF NOT EXISTS idx_release_year ON movies(release_year);
                CREATE INDEX IF NOT EXISTS idx_popularity ON movies(popularity);
            "#,
        },
    ],
};
