//! PGRL CLI - Command line interface for the PGRL helpers
//!
//! The training loop calls the library directly. This CLI is for inspecting
//! rewards and frames offline and for checking seeding.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::needless_pass_by_value)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pgrl_core::util::load_env_file;

mod commands;
mod config;

use commands::{discount, preprocess, seed};
use config::Config;

#[derive(Parser)]
#[command(name = "pgrl")]
#[command(author, version, about = "PGRL - policy-gradient Pong helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (overrides the search path)
    #[arg(short, long, global = true, env = "PGRL_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute discounted returns for a reward sequence
    Discount(discount::DiscountArgs),

    /// Crop, downsample and difference a raw Pong frame
    Preprocess(preprocess::PreprocessArgs),

    /// Set the global seed and print samples from each stream
    Seed(seed::SeedArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(commands::config::ConfigCommands),
}

fn main() -> Result<()> {
    // Load environment from pgrl.env file (before parsing args). Logging is
    // not up yet, so the outcome is reported once the subscriber exists.
    let env_file = load_env_file();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    pgrl_core::init_tracing(&config.logging)?;

    match env_file {
        Ok(Some(path)) => tracing::debug!("Loaded environment from {:?}", path),
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to read env file: {e}"),
    }
    match &config.source {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Discount(args) => discount::run(args, &config.discount, &mut std::io::stdout()),
        Commands::Preprocess(args) => preprocess::run(args, &config.frame),
        Commands::Seed(args) => seed::run(args, &config.seed),
        Commands::Config(cmd) => commands::config::run(cmd, &config, &mut std::io::stdout()),
    }
}
