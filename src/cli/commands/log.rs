use super::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::audit::{self, AuditEntry};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::truncate_display;
use crate::utils::table::display_width;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation painted.
fn op_label(e: &AuditEntry) -> String {
    let plain = if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    };
    let cut = truncate_display(&plain, MAX_OP_WIDTH);
    let paint = color_for_operation(&e.operation);
    match cut.split_once(' ') {
        Some((op, rest)) => format!("{} {}", paint.paint(op), rest),
        None => paint.paint(cut.as_str()).to_string(),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let store = open_db(cfg)?;
    let entries = audit::load_all(&store)?;
    if entries.is_empty() {
        info("Audit log is empty");
        return Ok(());
    }

    let labels: Vec<String> = entries.iter().map(op_label).collect();
    let op_w = labels.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let id_w = entries
        .iter()
        .map(|e| e.id.unwrap_or(0).to_string().len())
        .max()
        .unwrap_or(1);

    println!("Audit log:\n");
    for (e, label) in entries.iter().zip(&labels) {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%F %T").to_string())
            .unwrap_or_else(|_| e.date.clone());
        let padding = " ".repeat(op_w.saturating_sub(display_width(label)));
        println!(
            "{:>id_w$}: {} | {}{} => {}",
            e.id.unwrap_or(0),
            date,
            label,
            padding,
            e.message,
            id_w = id_w
        );
    }
    Ok(())
}
