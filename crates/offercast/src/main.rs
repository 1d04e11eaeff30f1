// SPDX-FileCopyrightText: 2026 Offercast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offercast - autonomous service provider for subscription networks.
//!
//! This is the binary entry point for the Offercast provider.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod offer;
mod serve;
mod status;

/// Offercast - fan service offers out to subscribers and track the replies.
#[derive(Parser, Debug)]
#[command(name = "offercast", version, about, long_about = None)]
struct Cli {
    /// Explicit config file (otherwise the XDG hierarchy is searched).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the provider: adapters plus poll loop, until SIGINT/SIGTERM.
    Serve,
    /// Fan one service offer out to every eligible subscriber, then exit.
    Offer {
        /// Service type being offered (required, non-empty).
        #[arg(long)]
        service_type: String,
        /// Offer text delivered to each subscriber.
        #[arg(long)]
        text: String,
        /// Media URL, repeatable; paired positionally with --media-type.
        #[arg(long = "media-url")]
        media_urls: Vec<String>,
        /// Media MIME type, repeatable; paired positionally with --media-url.
        #[arg(long = "media-type")]
        media_types: Vec<String>,
        /// Optional media title, repeatable.
        #[arg(long = "media-title")]
        media_titles: Vec<String>,
    },
    /// Show the effective configuration and record store summary.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("offercast=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => offercast_config::load_and_validate_path(path),
        None => offercast_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            offercast_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing();

    let result = match cli.command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Offer {
            service_type,
            text,
            media_urls,
            media_types,
            media_titles,
        } => {
            offer::run_offer(
                config,
                &service_type,
                &text,
                media_urls,
                media_types,
                media_titles,
            )
            .await
        }
        Commands::Status { json } => status::run_status(&config, json).await,
    };

    if let Err(e) = result {
        eprintln!("offercast: {e}");
        std::process::exit(1);
    }
}
