//! Row-store boundary.
//!
//! Every view talks to persistence through `RowStore`: a table-oriented API
//! with `select`, `insert`, `update` and `delete`. Rows are JSON objects so
//! that any backend (SQLite here, a REST data service elsewhere) can sit
//! behind the same contract.

pub mod query;
pub mod records;

pub use query::{Direction, Filter, Order, Query};
pub use records::{Record, delete_record, fetch, fetch_one, insert_one, update_record};

use crate::errors::AppResult;
use serde_json::{Map, Value};

/// One table row as a column → value map.
pub type Row = Map<String, Value>;

/// Named collections exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Locations,
    ChurnEvents,
    UpsellEvents,
    ClientNotes,
    SalesTargets,
    Credentials,
    AuditLog,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Locations,
        Table::ChurnEvents,
        Table::UpsellEvents,
        Table::ClientNotes,
        Table::SalesTargets,
        Table::Credentials,
        Table::AuditLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Locations => "locations",
            Table::ChurnEvents => "churn_events",
            Table::UpsellEvents => "upsell_events",
            Table::ClientNotes => "client_notes",
            Table::SalesTargets => "sales_targets",
            Table::Credentials => "credentials",
            Table::AuditLog => "audit_log",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic row-based persistence API.
///
/// Implementations never interpret row contents beyond column names and
/// scalar values; typing happens in [`records`].
pub trait RowStore {
    /// `select *` with the filters and ordering carried by `query`.
    fn select(&self, table: Table, query: &Query) -> AppResult<Vec<Row>>;

    /// Insert every row of `rows`. Columns left out take the table defaults.
    fn insert(&self, table: Table, rows: &[Row]) -> AppResult<()>;

    /// Apply `patch` to rows where `key_column = key`. Returns affected rows.
    fn update(&self, table: Table, patch: &Row, key_column: &str, key: &Value)
    -> AppResult<usize>;

    /// Delete rows where `key_column = key`. Returns affected rows.
    fn delete(&self, table: Table, key_column: &str, key: &Value) -> AppResult<usize>;
}

impl<S: RowStore + ?Sized> RowStore for &S {
    fn select(&self, table: Table, query: &Query) -> AppResult<Vec<Row>> {
        (**self).select(table, query)
    }

    fn insert(&self, table: Table, rows: &[Row]) -> AppResult<()> {
        (**self).insert(table, rows)
    }

    fn update(
        &self,
        table: Table,
        patch: &Row,
        key_column: &str,
        key: &Value,
    ) -> AppResult<usize> {
        (**self).update(table, patch, key_column, key)
    }

    fn delete(&self, table: Table, key_column: &str, key: &Value) -> AppResult<usize> {
        (**self).delete(table, key_column, key)
    }
}
