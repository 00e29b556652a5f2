use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::balldontlie::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment name, reported by the health check
    pub api_env: String,

    /// Pretty debug-level logs when true, JSON info-level logs otherwise
    pub debug: bool,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,

    /// SHA-256 hex of the client API key (None = verification skipped)
    pub api_key_hash: Option<String>,

    /// balldontlie.io API key
    pub balldontlie_api_key: Option<String>,

    /// balldontlie.io base URL
    pub balldontlie_api_url: String,

    /// Seconds a fetched game list is served without going upstream
    pub cache_ttl_secs: u64,

    /// Upstream request timeout in seconds
    pub upstream_timeout_secs: u64,

    /// Address the HTTP server listens on
    pub bind_addr: String,
}

impl Config {
    /// Load configuration from `.env.local`, `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        Ok(Config {
            api_env: env::var("API_ENV").unwrap_or_else(|_| "development".to_string()),

            debug: parse_bool(&env::var("DEBUG").unwrap_or_else(|_| "true".to_string()))
                .context("DEBUG must be true or false")?,

            cors_origins: parse_cors_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),

            api_key_hash: non_empty(env::var("API_KEY_HASH").ok()),

            balldontlie_api_key: non_empty(env::var("BALLDONTLIE_API_KEY").ok()),

            balldontlie_api_url: env::var("BALLDONTLIE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            cache_ttl_secs: env::var("CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("CACHE_TTL_SECONDS must be a valid number")?,

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("UPSTREAM_TIMEOUT_SECONDS must be a valid number")?,

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Split a comma separated origin list, dropping blanks
pub fn parse_cors_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean: {}", other),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
