// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MemeForge - a meme marketing content pipeline service.
//!
//! This is the binary entry point for the MemeForge service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// MemeForge - a meme marketing content pipeline service.
#[derive(Parser, Debug)]
#[command(name = "memeforge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the MemeForge gateway server.
    Serve,
    /// Analyze a website and print the extracted business profile.
    Analyze {
        /// Website URL to analyze.
        url: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match memeforge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            memeforge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Analyze { url }) => serve::run_analyze(config, &url).await,
        None => {
            println!("memeforge: use --help for available commands");
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("memeforge: {e}");
        std::process::exit(1);
    }
}
