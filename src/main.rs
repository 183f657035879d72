//! Pokedex - an interactive PokeAPI client
//!
//! Pages through location areas, explores their encounters and catches
//! Pokemon, caching API responses in memory between commands.

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pokedex::api::PokeApiClient;
use pokedex::cache::Cache;
use pokedex::cli::{AppConfig, Cli};
use pokedex::commands::Session;
use pokedex::repl;

/// Sets up logging to stderr so it never interleaves with REPL output on stdout
///
/// `RUST_LOG` takes precedence over `--log-level`.
fn init_tracing(default_filter: &str) -> Result<(), Box<dyn Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_cli(&cli)?;

    init_tracing(&config.log_level)?;
    info!(
        api_url = %config.api_url,
        reap_interval = ?config.cache.reap_interval,
        max_age = ?config.cache.max_age,
        "starting pokedex"
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cache = Cache::with_config(config.cache);
    let client = PokeApiClient::with_base_url(config.api_url);
    let mut session = Session::new(client, cache, config.page_size, rng);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = repl::run(&mut session, stdin, &mut io::stdout()).await;

    session.into_cache().stop().await;
    info!("pokedex closed");

    result?;
    Ok(())
}
