use super::{open_db, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{Dashboard, GroupTotal};
use crate::errors::AppResult;
use crate::session::{View, authorize};
use crate::ui::messages::{field, header, warning};
use crate::utils::colors::{color_for_amount, paint};
use crate::utils::date::today;
use crate::utils::format_currency;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Dashboard { period } = cmd else {
        return Ok(());
    };

    let session = open_session(cfg);
    authorize(View::Dashboard, &session)?;

    let store = open_db(cfg)?;
    let today = today();
    let mut dash = Dashboard::new(cfg.default_period);
    let loaded = match period {
        Some(p) => dash.set_period(&store, *p, today),
        None => dash.refresh(&store, today),
    };
    if !loaded {
        warning("Could not load dashboard data; showing empty figures.");
    }

    let money = |v: f64| format_currency(v, &cfg.currency_symbol, cfg.number_format);
    let (start, end) = dash.period.bounds(today);

    header(format!("Dashboard, {} ({} → {})", dash.period.label(), start, end));

    let progress = dash.progress();
    let net = dash.report.current_total();
    field("Monthly target", money(dash.target));
    field("Gained", paint(&money(dash.report.total_gained), color_for_amount(1.0)));
    field("Lost", paint(&money(dash.report.total_lost), color_for_amount(-1.0)));
    field("Net", paint(&money(net), color_for_amount(net)));
    field("Progress", format!("{} {}", progress, progress.bar(20)));
    println!();

    print_groups("Gained by squad", &dash.report.gained_by_squad, &money);
    print_groups("Gained by service", &dash.report.gained_by_service, &money);
    print_groups("Lost by squad", &dash.report.lost_by_squad, &money);
    print_groups("Lost by reason", &dash.report.lost_by_reason, &money);

    if !dash.report.monthly.is_empty() {
        let mut t = Table::new(vec![
            Column::left("Month"),
            Column::right("Gained"),
            Column::right("Lost"),
        ]);
        for m in &dash.report.monthly {
            t.add_row(vec![m.month.clone(), money(m.gained), money(m.lost)]);
        }
        println!("Monthly\n{}", t.render());
    }

    Ok(())
}

fn print_groups(title: &str, groups: &[GroupTotal], money: &dyn Fn(f64) -> String) {
    if groups.is_empty() {
        return;
    }
    let mut t = Table::new(vec![Column::left(title), Column::right("Total")]);
    for g in groups {
        t.add_row(vec![g.label.clone(), money(g.total)]);
    }
    println!("{}", t.render());
}
