use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub industry_taxonomy_path: PathBuf,
    pub occupation_taxonomy_path: PathBuf,
    /// Optional JSON file replacing the built-in compatibility rules.
    pub compatibility_table_path: Option<PathBuf>,
    /// When unset, AI is disabled and every classification takes the lexical path.
    pub anthropic_api_key: Option<String>,
    pub ai_timeout_secs: u64,
    pub candidate_pool_size: usize,
    pub low_confidence_threshold: f64,
    pub batch_concurrency: usize,
    pub max_batch_size: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");

        Ok(Config {
            industry_taxonomy_path: var("INDUSTRY_TAXONOMY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("industry_taxonomy.csv")),
            occupation_taxonomy_path: var("OCCUPATION_TAXONOMY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("occupation_taxonomy.csv")),
            compatibility_table_path: var("COMPATIBILITY_TABLE_PATH").map(PathBuf::from),
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            ai_timeout_secs: parse_or(var("AI_TIMEOUT_SECS"), "AI_TIMEOUT_SECS", 30)?,
            candidate_pool_size: parse_or(var("CANDIDATE_POOL_SIZE"), "CANDIDATE_POOL_SIZE", 15)?,
            low_confidence_threshold: parse_or(
                var("LOW_CONFIDENCE_THRESHOLD"),
                "LOW_CONFIDENCE_THRESHOLD",
                30.0,
            )?,
            batch_concurrency: parse_or(var("BATCH_CONCURRENCY"), "BATCH_CONCURRENCY", 4)?,
            max_batch_size: parse_or(var("MAX_BATCH_SIZE"), "MAX_BATCH_SIZE", 100)?,
            port: parse_or(var("PORT"), "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
