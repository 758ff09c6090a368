//! Configuration management commands

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, config: &Config, out: &mut impl Write) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config, out),
        ConfigCommands::Init { force } => init(Path::new("pgrl.toml"), force),
    }
}

fn show(config: &Config, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Current Configuration")?;
    writeln!(out, "=====================\n")?;

    match &config.source {
        Some(path) => writeln!(out, "Config file: {}\n", path.display())?,
        None => writeln!(out, "No configuration file found. Using defaults.\n")?,
    }

    writeln!(out, "{}", config.to_toml()?)?;
    Ok(())
}

fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        println!("Configuration file already exists: {}", config_path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    std::fs::write(config_path, Config::default().to_toml()?)?;
    println!("Configuration file created: {}", config_path.display());

    Ok(())
}
