// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! shadowgate - inspect deterministic prod/candidate traffic routing.
//!
//! This is the binary entry point: it loads configuration, installs the
//! tracing subscriber and dispatches to the offline inspection commands.

mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shadowgate_config::ShadowgateConfig;
use shadowgate_core::Mode;

/// shadowgate - inspect deterministic prod/candidate traffic routing.
#[derive(Parser, Debug)]
#[command(name = "shadowgate", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the bucket a request body lands in.
    Bucket {
        /// Request body file (`{"rows": [...]}`), or `-` for stdin.
        payload: String,
    },
    /// Print the routing decision for a request body.
    Route {
        /// Request body file (`{"rows": [...]}`), or `-` for stdin.
        payload: String,
        /// Override the configured routing mode.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,
        /// Override the configured canary percentage (clamped to 0..=100).
        #[arg(long, allow_hyphen_values = true)]
        canary_pct: Option<i64>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse::<Mode>().map_err(|e| e.to_string())
}

fn load_config(path: Option<&PathBuf>) -> ShadowgateConfig {
    let loaded = match path {
        Some(path) => shadowgate_config::load_and_validate_path(path),
        None => shadowgate_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            shadowgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shadowgate={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.service.log_level);
    shadowgate_router::recording::register_metrics();

    tracing::debug!(
        service = config.service.name.as_str(),
        mode = config.routing.mode.as_str(),
        canary_pct = config.routing.canary_pct,
        "config loaded"
    );

    let result = match cli.command {
        Commands::Bucket { payload } => inspect::run_bucket(&payload),
        Commands::Route {
            payload,
            mode,
            canary_pct,
        } => inspect::run_route(&config, &payload, mode, canary_pct),
        Commands::Config => inspect::run_config(&config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
