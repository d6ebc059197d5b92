//! Skyview - current weather for any city, in your units
//!
//! A command-line application that looks up current conditions for a city and
//! prints them using the user's saved unit preferences.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyview::app::{ApiSettings, App};
use skyview::cli::Cli;
use skyview::storage::KeyValueStore;

/// Sets up logging to stderr so reports on stdout stay clean.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags pick the level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "skyview=warn",
        1 => "skyview=debug",
        _ => "skyview=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = match &cli.config_dir {
        Some(dir) => KeyValueStore::with_dir(dir.clone()),
        None => match KeyValueStore::new() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let api = ApiSettings {
        api_key: cli.resolved_api_key().ok(),
        weather_url: cli.api_url.clone(),
        geo_url: cli.geo_url.clone(),
    };
    let app = App::new(store, api);

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    match app.run(cli.command, &mut stdout, &mut stderr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
