mod import;
mod models;
mod schema;
mod store;
mod trait_def;

pub use import::{load_import_file, parse_import, CatalogImportError};
pub use models::*;
pub use schema::CATALOG_SCHEMA;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
