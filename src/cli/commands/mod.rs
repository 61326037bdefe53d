pub mod auth;
pub mod churn;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod init;
pub mod log;
pub mod map;
pub mod note;
pub mod target;
pub mod upsell;
pub mod user;

use crate::config::Config;
use crate::db::open_store;
use crate::db::pool::SqliteStore;
use crate::errors::AppResult;
use crate::session::{FileSessionStorage, Session};
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Session restored from the configured session file.
pub(crate) fn open_session(cfg: &Config) -> Session<FileSessionStorage> {
    Session::open(FileSessionStorage::new(&cfg.session_file))
}

pub(crate) fn open_db(cfg: &Config) -> AppResult<SqliteStore> {
    open_store(&cfg.database)
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
