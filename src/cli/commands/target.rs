use super::{open_db, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::target;
use crate::errors::AppResult;
use crate::session::{View, authorize};
use crate::ui::messages::{field, success};
use crate::utils::format_currency;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Target { set } = cmd else {
        return Ok(());
    };

    let session = open_session(cfg);
    authorize(View::Dashboard, &session)?;
    let store = open_db(cfg)?;

    match set {
        Some(raw) => {
            let value = target::set(&store, &session, raw)?;
            success(format!(
                "Monthly target set to {}",
                format_currency(value, &cfg.currency_symbol, cfg.number_format)
            ));
        }
        None => {
            let t = target::current(&store)?;
            field(
                "Monthly target",
                format_currency(t.monthly_target, &cfg.currency_symbol, cfg.number_format),
            );
        }
    }
    Ok(())
}
