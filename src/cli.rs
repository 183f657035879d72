//! Command-line interface parsing for the Pokedex
//!
//! This module handles parsing of CLI arguments using clap and validates them
//! into the `AppConfig` the binary starts from. Each option can also be set
//! through an environment variable.

use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::api::POKEAPI_BASE_URL;
use crate::cache::CacheConfig;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid reap interval: must be at least one second")]
    InvalidReapInterval,

    #[error("Invalid max age: must be at least one second")]
    InvalidMaxAge,

    #[error("Invalid page size: {0}. Must be between 1 and 100")]
    InvalidPageSize(u32),

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Pokedex - explore location areas and catch Pokemon from the PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "An interactive Pokedex backed by the PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Base URL of the PokeAPI
    #[arg(long, env = "POKEDEX_API_URL", default_value = POKEAPI_BASE_URL)]
    pub api_url: String,

    /// How often the cache reaper runs, and how old an entry must be for it to be reaped
    #[arg(long, env = "POKEDEX_REAP_INTERVAL_SECS", default_value_t = 30)]
    pub reap_interval_secs: u64,

    /// Age after which a cached response is discarded on read
    #[arg(long, env = "POKEDEX_MAX_AGE_SECS", default_value_t = 24 * 60 * 60)]
    pub max_age_secs: u64,

    /// Location areas shown per `map` page
    #[arg(long, default_value_t = 20)]
    pub page_size: u32,

    /// Seed for catch rolls, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "pokedex=trace")
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Validated startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL, always ending with `/`
    pub api_url: String,
    pub cache: CacheConfig,
    pub page_size: u32,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl AppConfig {
    /// Creates an AppConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` with durations converted and the API URL normalised
    /// * `Err(CliError)` if any value is out of range or the URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.reap_interval_secs == 0 {
            return Err(CliError::InvalidReapInterval);
        }
        if cli.max_age_secs == 0 {
            return Err(CliError::InvalidMaxAge);
        }
        if !(1..=100).contains(&cli.page_size) {
            return Err(CliError::InvalidPageSize(cli.page_size));
        }

        Ok(AppConfig {
            api_url: parse_api_url(&cli.api_url)?,
            cache: CacheConfig {
                reap_interval: Duration::from_secs(cli.reap_interval_secs),
                max_age: Duration::from_secs(cli.max_age_secs),
            },
            page_size: cli.page_size,
            seed: cli.seed,
            log_level: cli.log_level.clone(),
        })
    }
}

/// Checks that `raw` is an absolute http(s) URL and gives it a trailing slash
fn parse_api_url(raw: &str) -> Result<String, CliError> {
    let invalid = |reason: String| CliError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    let mut normalised = url.to_string();
    if !normalised.ends_with('/') {
        normalised.push('/');
    }
    Ok(normalised)
}
