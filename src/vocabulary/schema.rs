//! Schema definition for the vocabulary tables.

use crate::sqlite_persistence::{SchemaComponent, VersionedSchema};

pub const VOCABULARY_SCHEMA: SchemaComponent = SchemaComponent {
    name: "vocabulary",
    versions: &[VersionedSchema {
        version: 1,
        up: r#"
            CREATE TABLE IF NOT EXISTS significant_words (
                word TEXT PRIMARY KEY,
                category TEXT,
                subcategory TEXT,
                weight INTEGER DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS stop_words (
                word TEXT PRIMARY KEY
            );
        "#,
    }],
};
