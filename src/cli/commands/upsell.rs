use super::churn::window_bounds;
use super::{open_db, open_session};
use crate::cli::parser::{Commands, UpsellAction};
use crate::config::Config;
use crate::core::filter::UpsellFilter;
use crate::core::upsells;
use crate::errors::AppResult;
use crate::models::{UpsellEvent, UpsellForm, UpsellPatch};
use crate::session::{View, authorize};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::format_currency;
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Upsell { action } = cmd else {
        return Ok(());
    };
    let session = open_session(cfg);

    match action {
        UpsellAction::List {
            company,
            service,
            manager,
            squad,
            window,
        } => {
            authorize(View::Upsells, &session)?;
            let (start, end) = window_bounds(window)?;
            let filter = UpsellFilter {
                company: company.clone(),
                service: service.clone(),
                manager: manager.clone(),
                squad: squad.clone(),
                start,
                end,
            };
            let store = open_db(cfg)?;
            print_upsells(&upsells::list(&store, &session, &filter)?, cfg);
        }
        UpsellAction::Add {
            company,
            service,
            date,
            manager,
            gained_value,
            squad,
        } => {
            authorize(View::AddUpsell, &session)?;
            let form = UpsellForm {
                company: company.clone(),
                service: service.clone(),
                upsell_date: date.clone(),
                manager: manager.clone(),
                gained_value: gained_value.clone(),
                squad: squad.clone(),
            };
            let store = open_db(cfg)?;
            let added = upsells::add(&store, &session, &form)?;
            success(format!(
                "Upsell recorded: {} / {} on {}",
                added.company, added.service, added.upsell_date
            ));
            print_upsells(&upsells::list(&store, &session, &UpsellFilter::default())?, cfg);
        }
        UpsellAction::Edit {
            id,
            company,
            service,
            date,
            manager,
            gained_value,
            squad,
        } => {
            authorize(View::Upsells, &session)?;
            let patch = UpsellPatch {
                company: company.clone(),
                service: service.clone(),
                upsell_date: date.clone(),
                manager: manager.clone(),
                gained_value: gained_value.clone(),
                squad: squad.clone(),
            };
            let store = open_db(cfg)?;
            let saved = upsells::edit(&store, &session, *id, &patch)?;
            success(format!("Upsell {} updated", saved.id));
        }
    }
    Ok(())
}

fn print_upsells(rows: &[UpsellEvent], cfg: &Config) {
    if rows.is_empty() {
        info("No upsell events found");
        return;
    }

    let mut t = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Company"),
        Column::left("Service"),
        Column::left("Manager"),
        Column::left("Squad"),
        Column::right("Gained"),
    ]);
    for u in rows {
        let gained = match u.gained_value {
            Some(v) => format_currency(v, &cfg.currency_symbol, cfg.number_format),
            None => colorize_optional("-"),
        };
        t.add_row(vec![
            u.id.to_string(),
            u.upsell_date.to_string(),
            or_dash(u.company.as_deref()),
            or_dash(u.service.as_deref()),
            or_dash(u.manager.as_deref()),
            or_dash(u.squad.as_deref()),
            gained,
        ]);
    }
    print!("{}", t.render());
    info(format!("{} upsell event(s)", rows.len()));
}
