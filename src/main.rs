// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use filter_camera::config::Config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "filter-camera")]
#[command(about = "Webcam preview, photo capture and clip recording with visual filters")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Live preview in the terminal (filter cycling, photo, record)
    Preview,

    /// List the available filters
    Filters,

    /// Take a photo
    Photo {
        /// Filter to apply (from 'filter-camera filters')
        #[arg(short, long)]
        filter: Option<String>,

        /// Output directory (default: ~/Downloads/FilterCamera)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a clip
    Record {
        /// Recording duration in seconds
        #[arg(short, long, default_value = "10")]
        duration: u64,

        /// Output directory (default: ~/Downloads/FilterCamera)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=filter_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Filters) => cli::list_filters(),
        Some(Commands::Photo { filter, output }) => cli::take_photo(filter, output),
        Some(Commands::Record { duration, output }) => cli::record(duration, output),
        Some(Commands::Preview) | None => {
            let config = Config::load();
            filter_camera::terminal::run(&config)
        }
    }
}
