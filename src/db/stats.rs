use crate::db::pool::SqliteStore;
use crate::errors::AppResult;
use crate::store::Table;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row count per table.
pub fn table_counts(store: &SqliteStore) -> AppResult<Vec<(Table, i64)>> {
    let mut out = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        let count: i64 = store.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.as_str()),
            [],
            |row| row.get(0),
        )?;
        out.push((table, count));
    }
    Ok(out)
}

/// Earliest and latest value of a date column, if the table has rows.
pub fn date_span(
    store: &SqliteStore,
    table: Table,
    column: &str,
) -> AppResult<Option<(String, String)>> {
    let span = store
        .conn
        .query_row(
            &format!(
                "SELECT MIN({column}), MAX({column}) FROM {} WHERE {column} IS NOT NULL",
                table.as_str()
            ),
            [],
            |row| {
                let min: Option<String> = row.get(0)?;
                let max: Option<String> = row.get(1)?;
                Ok(min.zip(max))
            },
        )
        .optional()?;
    Ok(span.flatten())
}

pub fn print_db_info(store: &SqliteStore, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!("{}• Rows:{}", CYAN, RESET);
    for (table, count) in table_counts(store)? {
        println!("    {:<14} {}{}{}", table.as_str(), GREEN, count, RESET);
    }

    for (label, table, column) in [
        ("Churn dates", Table::ChurnEvents, "churn_date"),
        ("Upsell dates", Table::UpsellEvents, "upsell_date"),
    ] {
        match date_span(store, table, column)? {
            Some((first, last)) => {
                println!("{}• {}:{} {} → {}", CYAN, label, RESET, first, last)
            }
            None => println!("{}• {}:{} {}--{}", CYAN, label, RESET, GREY, RESET),
        }
    }

    println!();
    Ok(())
}
