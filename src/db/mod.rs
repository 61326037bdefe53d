pub mod initialize;
pub mod migrate;
pub mod pool;
pub mod stats;

use crate::errors::AppResult;
use pool::SqliteStore;

/// Open the database file and bring its schema up to date.
pub fn open_store(path: &str) -> AppResult<SqliteStore> {
    let store = SqliteStore::open(path)?;
    initialize::init_db(&store.conn)?;
    Ok(store)
}

/// Fresh, migrated in-memory database.
pub fn open_memory_store() -> AppResult<SqliteStore> {
    let store = SqliteStore::open_in_memory()?;
    initialize::init_db(&store.conn)?;
    Ok(store)
}
