use super::{open_db, open_session};
use crate::cli::parser::{ChurnAction, Commands, DateWindowArgs};
use crate::config::Config;
use crate::core::churns;
use crate::core::filter::ChurnFilter;
use crate::errors::AppResult;
use crate::models::form::parse_form_date;
use crate::models::{ChurnEvent, ChurnForm, ChurnPatch};
use crate::session::{View, authorize};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::parse_range;
use crate::utils::format_currency;
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

/// Inclusive bounds from `--period`, or from `--from`/`--to`.
pub(crate) fn window_bounds(
    w: &DateWindowArgs,
) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(p) = &w.period {
        let (s, e) = parse_range(p)?;
        return Ok((Some(s), Some(e)));
    }
    let from = w.from.as_deref().map(|s| parse_form_date("from", s)).transpose()?;
    let to = w.to.as_deref().map(|s| parse_form_date("to", s)).transpose()?;
    Ok((from, to))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Churn { action } = cmd else {
        return Ok(());
    };
    let session = open_session(cfg);

    match action {
        ChurnAction::List {
            company,
            reason,
            manager,
            squad,
            window,
        } => {
            authorize(View::Churns, &session)?;
            let (start, end) = window_bounds(window)?;
            let filter = ChurnFilter {
                company: company.clone(),
                reason: reason.clone(),
                manager: manager.clone(),
                squad: squad.clone(),
                start,
                end,
            };
            let store = open_db(cfg)?;
            print_churns(&churns::list(&store, &session, &filter)?, cfg);
        }
        ChurnAction::Add {
            company,
            reason,
            date,
            ltv,
            manager,
            lost_value,
            squad,
        } => {
            authorize(View::AddChurn, &session)?;
            let form = ChurnForm {
                company: company.clone(),
                reason: reason.clone(),
                churn_date: date.clone(),
                ltv: ltv.clone(),
                manager: manager.clone(),
                lost_value: lost_value.clone(),
                squad: squad.clone(),
            };
            let store = open_db(cfg)?;
            let added = churns::add(&store, &session, &form)?;
            success(format!("Churn recorded: {} on {}", added.company, added.churn_date));
            print_churns(&churns::list(&store, &session, &ChurnFilter::default())?, cfg);
        }
        ChurnAction::Edit {
            id,
            company,
            reason,
            date,
            ltv,
            manager,
            lost_value,
            squad,
        } => {
            authorize(View::Churns, &session)?;
            let patch = ChurnPatch {
                company: company.clone(),
                reason: reason.clone(),
                churn_date: date.clone(),
                ltv: ltv.clone(),
                manager: manager.clone(),
                lost_value: lost_value.clone(),
                squad: squad.clone(),
            };
            let store = open_db(cfg)?;
            let saved = churns::edit(&store, &session, *id, &patch)?;
            success(format!("Churn {} updated", saved.id));
        }
    }
    Ok(())
}

fn print_churns(rows: &[ChurnEvent], cfg: &Config) {
    if rows.is_empty() {
        info("No churn events found");
        return;
    }
    let money = |v: Option<f64>| match v {
        Some(v) => format_currency(v, &cfg.currency_symbol, cfg.number_format),
        None => colorize_optional("-"),
    };

    let mut t = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Company"),
        Column::left("Reason"),
        Column::left("Manager"),
        Column::left("Squad"),
        Column::right("LTV"),
        Column::right("Lost"),
    ]);
    for c in rows {
        t.add_row(vec![
            c.id.to_string(),
            c.churn_date.to_string(),
            or_dash(c.company.as_deref()),
            or_dash(c.reason.as_deref()),
            or_dash(c.manager.as_deref()),
            or_dash(c.squad.as_deref()),
            money(c.ltv),
            money(c.lost_value),
        ]);
    }
    print!("{}", t.render());
    info(format!("{} churn event(s)", rows.len()));
}
