use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        header(format!("Configuration ({})", path.display()));
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("{}", yaml);
    }

    if *edit_config {
        if !path.exists() {
            cfg.save_to(&path)?;
        }

        let fallback = default_editor();
        let requested = editor.clone().unwrap_or_else(|| fallback.clone());

        if run_editor(&requested, &path) {
            success(format!("Configuration edited with '{}'", requested));
        } else {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            ));
            if run_editor(&fallback, &path) {
                success(format!("Configuration edited with '{}'", fallback));
            } else {
                error(format!("Failed to edit configuration with '{}'", fallback));
            }
        }
    }

    Ok(())
}
