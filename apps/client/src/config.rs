use anyhow::{Context, Result};

/// Default location of the persisted auth token, relative to the home
/// directory. Stands in for the browser's local storage slot.
const DEFAULT_TOKEN_FILE: &str = ".jobtrack/token";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API; all resource paths are relative to it.
    pub api_base_url: String,
    /// Path of the file holding the bearer token, if the user is logged in.
    pub auth_token_file: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            auth_token_file: std::env::var("AUTH_TOKEN_FILE")
                .unwrap_or_else(|_| default_token_path()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_token_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{home}/{DEFAULT_TOKEN_FILE}")
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
