//! Typed helpers on top of the untyped `RowStore` contract.

use super::{Query, Row, RowStore, Table};
use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A persisted record that mirrors exactly one row of `TABLE`.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const TABLE: Table;
    const KEY_COLUMN: &'static str = "id";

    /// Identity value matched by `KEY_COLUMN` on update/delete.
    fn key(&self) -> Value;

    /// Query used to (re)load the whole collection for a list view.
    fn list_query() -> Query {
        Query::new()
    }
}

/// Serialize any struct into a store row.
pub fn to_row<T: Serialize>(value: &T) -> AppResult<Row> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Store(format!(
            "expected an object row, got `{}`",
            other
        ))),
    }
}

/// Deserialize store rows into typed records.
pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|r| serde_json::from_value(Value::Object(r)).map_err(AppError::from))
        .collect()
}

pub fn fetch<T: DeserializeOwned>(
    store: &impl RowStore,
    table: Table,
    query: &Query,
) -> AppResult<Vec<T>> {
    let rows = store.select(table, query)?;
    from_rows(rows)
}

/// Fetch exactly one row. Zero or several matches are an error.
pub fn fetch_one<T: DeserializeOwned>(
    store: &impl RowStore,
    table: Table,
    query: &Query,
) -> AppResult<T> {
    let mut rows: Vec<T> = fetch(store, table, query)?;
    match rows.len() {
        1 => Ok(rows.remove(0)),
        0 => Err(AppError::NotFound(format!("no row in `{}`", table))),
        n => Err(AppError::Store(format!(
            "expected a single row in `{}`, found {}",
            table, n
        ))),
    }
}

pub fn insert_one<T: Serialize>(store: &impl RowStore, table: Table, value: &T) -> AppResult<()> {
    let row = to_row(value)?;
    store.insert(table, &[row])
}

/// Whole-row update keyed by the record identity.
pub fn update_record<T: Record>(store: &impl RowStore, record: &T) -> AppResult<()> {
    let patch = to_row(record)?;
    let key = record.key();
    let affected = store.update(T::TABLE, &patch, T::KEY_COLUMN, &key)?;
    if affected == 0 {
        return Err(AppError::NotFound(format!("{} {}", T::TABLE, key)));
    }
    Ok(())
}

pub fn delete_record(store: &impl RowStore, table: Table, key: &Value) -> AppResult<()> {
    let affected = store.delete(table, "id", key)?;
    if affected == 0 {
        return Err(AppError::NotFound(format!("{} {}", table, key)));
    }
    Ok(())
}
