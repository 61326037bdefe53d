use crate::ui::messages::success;
use log::info;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and recorded in `audit_log`.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_core_tables",
        description: "Created locations, churn, upsell, notes and sales target tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS locations (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            company    TEXT NOT NULL,
            city       TEXT NOT NULL,
            state      TEXT NOT NULL,
            country    TEXT NOT NULL,
            latitude   TEXT NOT NULL,
            longitude  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS churn_events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            company    TEXT,
            reason     TEXT,
            churn_date TEXT NOT NULL,
            ltv        REAL,
            manager    TEXT,
            lost_value REAL,
            squad      TEXT
        );

        CREATE TABLE IF NOT EXISTS upsell_events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            company      TEXT,
            service      TEXT,
            upsell_date  TEXT NOT NULL,
            manager      TEXT,
            gained_value REAL,
            squad        TEXT
        );

        CREATE TABLE IF NOT EXISTS client_notes (
            id          TEXT PRIMARY KEY DEFAULT (lower(hex(randomblob(16)))),
            client_name TEXT NOT NULL,
            note        TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS sales_targets (
            id             TEXT PRIMARY KEY,
            monthly_target REAL NOT NULL DEFAULT 0
        );

        INSERT OR IGNORE INTO sales_targets (id, monthly_target) VALUES ('current', 0);
        "#,
    },
    Migration {
        version: "20250301_0002_credentials",
        description: "Created credentials table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS credentials (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            email      TEXT NOT NULL UNIQUE,
            password   TEXT NOT NULL,
            role       TEXT NOT NULL DEFAULT 'member' CHECK(role IN ('admin', 'member'))
        );
        "#,
    },
    Migration {
        version: "20250415_0003_event_date_indexes",
        description: "Added date indexes on churn and upsell events",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_churn_events_date ON churn_events(churn_date);
        CREATE INDEX IF NOT EXISTS idx_upsell_events_date ON upsell_events(upsell_date);
        CREATE INDEX IF NOT EXISTS idx_client_notes_updated ON client_notes(updated_at);
        "#,
    },
];

/// Ensure that the `audit_log` table exists.
fn ensure_audit_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO audit_log (date, operation, target, message)
         VALUES (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    info!("event=migration_applied version={}", m.version);
    success(format!("Migration applied: {}", m.version));
    Ok(())
}

/// Versions not yet recorded in `audit_log`.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_audit_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_audit_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM audit_log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied as usize, MIGRATIONS.len());
        assert!(pending_migrations(&conn).unwrap().is_empty());
    }

    #[test]
    fn seeds_current_sales_target() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        let target: f64 = conn
            .query_row(
                "SELECT monthly_target FROM sales_targets WHERE id = 'current'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(target, 0.0);
    }
}
