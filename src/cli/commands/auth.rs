//! `login`, `logout` and `whoami`.

use super::{open_db, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth;
use crate::errors::AppResult;
use crate::ui::messages::{field, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut session = open_session(cfg);

    match cmd {
        Commands::Login { email, password } => {
            let store = open_db(cfg)?;
            let id = auth::sign_in(&store, &mut session, email, password)?;
            success(format!("Signed in as {} ({})", id.email, id.role.to_db_str()));
        }
        Commands::Logout => {
            if session.is_signed_in() {
                session.sign_out()?;
                success("Signed out");
            } else {
                info("No active session");
            }
        }
        Commands::Whoami => match session.identity() {
            Some(id) => {
                field("Email", &id.email);
                field("Role", id.role.to_db_str());
                field("Since", &id.created_at);
            }
            None => info("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}
