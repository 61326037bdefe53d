use super::{open_db, open_session};
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::auth;
use crate::errors::AppResult;
use crate::models::Role;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let session = open_session(cfg);

    match action {
        UserAction::Add {
            email,
            password,
            role,
        } => {
            let role = Role::from_code(role)?;
            session.require_elevated()?;
            let store = open_db(cfg)?;
            auth::create_credential(&store, &session, email, password, role)?;
            success(format!("User {} created ({})", email.trim(), role.to_db_str()));
        }
    }
    Ok(())
}
