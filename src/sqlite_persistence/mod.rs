mod versioned_schema;

pub use versioned_schema::{SchemaComponent, VersionedSchema};

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Connection shared by every store opened on the same database file.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the SQLite database at `path`.
pub fn open_shared<P: AsRef<Path>>(path: P) -> Result<SharedConnection> {
    let path = path.as_ref();
    if !path.exists() {
        info!("Creating new database at {:?}", path);
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database, used by tests and dry runs.
pub fn open_shared_in_memory() -> Result<SharedConnection> {
    let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
    Ok(Arc::new(Mutex::new(conn)))
}
