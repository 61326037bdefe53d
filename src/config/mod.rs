use crate::core::dashboard::Period;
use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, resolve_under};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How amounts are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NumberFormat {
    /// `1.234,56`
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// `1,234.56`
    #[serde(rename = "en-US")]
    EnUs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default)]
    pub number_format: NumberFormat,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_period: Period,
}

fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    Config::config_dir()
        .join("logs")
        .to_string_lossy()
        .to_string()
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            session_file: default_session_file(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            number_format: NumberFormat::default(),
            currency_symbol: default_currency_symbol(),
            default_period: Period::default(),
        }
    }
}

impl Config {
    /// `~/.opsboard`, or `./.opsboard` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".opsboard")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("opsboard.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("opsboard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.expand_paths();
        Ok(cfg)
    }

    fn expand_paths(&mut self) {
        for p in [&mut self.database, &mut self.session_file, &mut self.log_dir] {
            *p = expand_tilde(p).to_string_lossy().to_string();
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Create the config directory, the config file (skipped in test mode)
    /// and an empty database file. Returns the resulting configuration.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => resolve_under(&dir, &name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}
