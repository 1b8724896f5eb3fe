use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_REPORT_CACHE_CAPACITY: usize = 256;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// `None` uses the skills database compiled into the binary.
    pub skills_db_path: Option<PathBuf>,
    /// `None` uses the job keywords compiled into the binary.
    pub job_keywords_path: Option<PathBuf>,
    pub report_cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: upload_limit(parse_env(
                "MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?)?,
            skills_db_path: optional_path("SKILLS_DB_PATH"),
            job_keywords_path: optional_path("JOB_KEYWORDS_PATH"),
            report_cache_capacity: parse_env(
                "REPORT_CACHE_CAPACITY",
                DEFAULT_REPORT_CACHE_CAPACITY,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            skills_db_path: None,
            job_keywords_path: None,
            report_cache_capacity: DEFAULT_REPORT_CACHE_CAPACITY,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn upload_limit(bytes: usize) -> Result<usize> {
    ensure!(bytes > 0, "Environment variable 'MAX_UPLOAD_BYTES' must be greater than zero");
    Ok(bytes)
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
