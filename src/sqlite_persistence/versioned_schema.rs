use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

const SCHEMA_VERSIONS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_versions (
        component TEXT PRIMARY KEY,
        version INTEGER NOT NULL
    );
"#;

/// One step of a component schema. `up` must be idempotent (`IF NOT EXISTS`)
/// so that databases created by other tools are adopted as-is.
pub struct VersionedSchema {
    pub version: usize,
    pub up: &'static str,
}

/// A group of tables owned by one store, with its ordered schema history.
pub struct SchemaComponent {
    pub name: &'static str,
    pub versions: &'static [VersionedSchema],
}

impl SchemaComponent {
    pub fn latest_version(&self) -> usize {
        self.versions.last().map(|s| s.version).unwrap_or(0)
    }

    /// Version recorded for this component, 0 when never applied.
    pub fn applied_version(&self, conn: &Connection) -> Result<usize> {
        conn.execute_batch(SCHEMA_VERSIONS_DDL)?;
        let version: Option<i64> = conn
            .query_row(
                "SELECT version FROM schema_versions WHERE component = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version.unwrap_or(0).max(0) as usize)
    }

    /// Run every pending step inside one transaction and record the new version.
    ///
    /// Returns the version the component is at afterwards.
    pub fn apply(&self, conn: &mut Connection) -> Result<usize> {
        let from_version = self.applied_version(conn)?;
        if from_version >= self.latest_version() {
            return Ok(from_version);
        }

        let tx = conn.transaction()?;
        let mut current = from_version;
        for schema in self.versions.iter().filter(|s| s.version > from_version) {
            info!(
                "Applying {} schema version {} (from {})",
                self.name, schema.version, current
            );
            tx.execute_batch(schema.up).with_context(|| {
                format!(
                    "Failed to apply {} schema version {}",
                    self.name, schema.version
                )
            })?;
            current = schema.version;
        }
        tx.execute(
            "INSERT OR REPLACE INTO schema_versions (component, version) VALUES (?1, ?2)",
            params![self.name, current as i64],
        )?;
        tx.commit()?;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COMPONENT: SchemaComponent = SchemaComponent {
        name: "test",
        versions: &[
            VersionedSchema {
                version: 1,
                up: "CREATE TABLE IF NOT EXISTS things (name TEXT PRIMARY KEY);",
            },
            VersionedSchema {
                version: 2,
                up: "CREATE INDEX IF NOT EXISTS idx_things_name ON things(name);",
            },
        ],
    };

    #[test]
    fn test_apply_fresh_database_reaches_latest_version() {
        let mut conn = Connection::open_in_memory().unwrap();

        assert_eq!(TEST_COMPONENT.applied_version(&conn).unwrap(), 0);
        assert_eq!(TEST_COMPONENT.apply(&mut conn).unwrap(), 2);
        assert_eq!(TEST_COMPONENT.applied_version(&conn).unwrap(), 2);

        let index_exists: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='index' AND name='idx_things_name'",
                [],
                |_| Ok(true),
            )
            .unwrap_or(false);
        assert!(index_exists);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        TEST_COMPONENT.apply(&mut conn).unwrap();
        conn.execute("INSERT INTO things (name) VALUES ('kept')", [])
            .unwrap();

        assert_eq!(TEST_COMPONENT.apply(&mut conn).unwrap(), 2);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM things", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_apply_adopts_existing_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE things (name TEXT PRIMARY KEY)", [])
            .unwrap();

        assert_eq!(TEST_COMPONENT.apply(&mut conn).unwrap(), 2);
    }

    #[test]
    fn test_apply_only_runs_pending_steps() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA_VERSIONS_DDL).unwrap();
        conn.execute(
            "INSERT INTO schema_versions (component, version) VALUES ('test', 1)",
            [],
        )
        .unwrap();
        // Version 1 is recorded but its table is absent, so only step 2 may run.
        let result = TEST_COMPONENT.apply(&mut conn);
        assert!(result.is_err());
        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(err_msg.contains("test schema version 2"));
    }
}
