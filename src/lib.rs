//! opsboard library root.
//! Exposes the CLI parser, the high-level `run()` function and the internal
//! modules (store, session gate, page logic).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            cli::commands::auth::handle(&cli.command, cfg)
        }
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg),
        Commands::Target { .. } => cli::commands::target::handle(&cli.command, cfg),
        Commands::Map { .. } => cli::commands::map::handle(&cli.command, cfg),
        Commands::Churn { .. } => cli::commands::churn::handle(&cli.command, cfg),
        Commands::Upsell { .. } => cli::commands::upsell::handle(&cli.command, cfg),
        Commands::Note { .. } => cli::commands::note::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(session_file) = &cli.session {
        cfg.session_file = session_file.clone();
    }

    if !cli.test
        && let Err(e) = logging::init_logging(&cfg.log_level, &cfg.log_dir)
    {
        ui::messages::warning(format!("File logging disabled: {}", e));
    }

    dispatch(&cli, &cfg)
}
