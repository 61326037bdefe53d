use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::{audit, auth};
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database with all pending migrations
///  - optionally, the first administrator account (only while no account exists)
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init {
        admin_email,
        admin_password,
    } = &cli.command
    else {
        return Ok(());
    };

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let store = open_store(&cfg.database)?;
    audit::record(
        &store,
        "init",
        "",
        &format!("Database initialized at {}", cfg.database),
    );

    if let (Some(email), Some(password)) = (admin_email, admin_password) {
        auth::bootstrap_admin(&store, email, password)?;
        success(format!("Administrator {} created", email.trim()));
    }

    success("opsboard initialization completed");
    Ok(())
}
