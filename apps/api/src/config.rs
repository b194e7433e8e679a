use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default so a first run needs no setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `library.json`.
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Commit the working document to the library after every edit.
    pub autosave: bool,
    /// Keep the library in memory only; nothing survives a restart.
    pub ephemeral: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".sira"),
            host: "127.0.0.1".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            autosave: true,
            ephemeral: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            data_dir: std::env::var("SIRA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            autosave: match std::env::var("SIRA_AUTOSAVE") {
                Ok(raw) => parse_bool(&raw)
                    .with_context(|| format!("SIRA_AUTOSAVE must be true or false, got '{raw}'"))?,
                Err(_) => defaults.autosave,
            },
            ephemeral: match std::env::var("SIRA_EPHEMERAL") {
                Ok(raw) => parse_bool(&raw)
                    .with_context(|| format!("SIRA_EPHEMERAL must be true or false, got '{raw}'"))?,
                Err(_) => defaults.ephemeral,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
