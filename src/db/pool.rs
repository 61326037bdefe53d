//! SQLite-backed `RowStore` (lightweight, one connection per CLI run).

use crate::errors::{AppError, AppResult};
use crate::store::{Direction, Query, Row, RowStore, Table};
use log::debug;
use regex::Regex;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use serde_json::{Number, Value};
use std::path::Path;
use std::sync::OnceLock;

pub struct SqliteStore {
    pub conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("static identifier regex"))
}

/// Column names end up inside SQL text, so only plain identifiers pass.
fn quote_ident(name: &str) -> AppResult<String> {
    if identifier_pattern().is_match(name) {
        Ok(format!("\"{}\"", name))
    } else {
        Err(AppError::Store(format!("invalid column name `{}`", name)))
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            Value::String(String::from_utf8_lossy(t).into_owned())
        }
    }
}

impl RowStore for SqliteStore {
    fn select(&self, table: Table, query: &Query) -> AppResult<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", table.as_str());
        let mut params = Vec::with_capacity(query.filters.len());

        for (i, f) in query.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!(
                "{} {} ?{}",
                quote_ident(f.column())?,
                f.operator(),
                i + 1
            ));
            params.push(to_sql(f.value()));
        }

        if let Some(order) = &query.order {
            let dir = match order.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            sql.push_str(&format!(" ORDER BY {} {}", quote_ident(&order.column)?, dir));
        }

        debug!("event=store_select table={} sql={:?}", table, sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt.query_map(params_from_iter(params), |row| {
            let mut out = Row::new();
            for (i, name) in names.iter().enumerate() {
                out.insert(name.clone(), from_sql(row.get_ref(i)?));
            }
            Ok(out)
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn insert(&self, table: Table, rows: &[Row]) -> AppResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        for row in rows {
            if row.is_empty() {
                tx.execute(&format!("INSERT INTO {} DEFAULT VALUES", table.as_str()), [])?;
                continue;
            }

            let mut cols = Vec::with_capacity(row.len());
            let mut marks = Vec::with_capacity(row.len());
            let mut params = Vec::with_capacity(row.len());
            for (i, (col, val)) in row.iter().enumerate() {
                cols.push(quote_ident(col)?);
                marks.push(format!("?{}", i + 1));
                params.push(to_sql(val));
            }

            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table.as_str(),
                cols.join(", "),
                marks.join(", ")
            );
            debug!("event=store_insert table={} sql={:?}", table, sql);
            tx.execute(&sql, params_from_iter(params))?;
        }

        tx.commit()?;
        Ok(())
    }

    fn update(
        &self,
        table: Table,
        patch: &Row,
        key_column: &str,
        key: &Value,
    ) -> AppResult<usize> {
        if patch.is_empty() {
            return Err(AppError::Store(format!("empty patch for `{}`", table)));
        }

        let mut sets = Vec::with_capacity(patch.len());
        let mut params = Vec::with_capacity(patch.len() + 1);
        for (i, (col, val)) in patch.iter().enumerate() {
            sets.push(format!("{} = ?{}", quote_ident(col)?, i + 1));
            params.push(to_sql(val));
        }
        params.push(to_sql(key));

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            table.as_str(),
            sets.join(", "),
            quote_ident(key_column)?,
            params.len()
        );
        debug!("event=store_update table={} key={}", table, key);

        Ok(self.conn.execute(&sql, params_from_iter(params))?)
    }

    fn delete(&self, table: Table, key_column: &str, key: &Value) -> AppResult<usize> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            table.as_str(),
            quote_ident(key_column)?
        );
        debug!("event=store_delete table={} key={}", table, key);

        Ok(self.conn.execute(&sql, [to_sql(key)])?)
    }
}
