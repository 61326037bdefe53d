use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::SqliteStore;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    // Opened without migrating so pending steps stay visible.
    let store = SqliteStore::open(&cfg.database)?;

    if *migrate {
        let pending = pending_migrations(&store.conn)?;
        println!("{}▶ Running migrations ({} pending)…{}", CYAN, pending.len(), RESET);
        run_pending_migrations(&store.conn)?;
        println!("{}✔ Migration completed.{}\n", GREEN, RESET);
    }

    if *info {
        stats::print_db_info(&store, &cfg.database)?;
    }

    if *check {
        println!("{}▶ Running integrity check…{}", CYAN, RESET);
        let integrity: String = store
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if integrity == "ok" {
            println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
        } else {
            println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
        }

        let pending = pending_migrations(&store.conn)?;
        if !pending.is_empty() {
            println!("{}Pending migrations:{} {}", CYAN, RESET, pending.join(", "));
        }
    }

    if *vacuum {
        println!("{}▶ Running VACUUM…{}", CYAN, RESET);
        store.conn.execute_batch("VACUUM;")?;
        println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
    }

    Ok(())
}
