//! Reward discounting command

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use pgrl_core::{get_logger, Reward};
use pgrl_rl::{discount_episodes, discount_rewards, normalize_returns};

use crate::config::DiscountConfig;

#[derive(Args)]
pub struct DiscountArgs {
    /// Rewards in timestep order
    #[arg(allow_negative_numbers = true)]
    rewards: Vec<Reward>,

    /// Read rewards from a file (whitespace or comma separated)
    #[arg(short, long, conflicts_with = "rewards")]
    file: Option<PathBuf>,

    /// Discount factor (defaults to discount.gamma from config)
    #[arg(short, long, allow_negative_numbers = true)]
    gamma: Option<f64>,

    /// Standardize the returns to zero mean and unit variance
    #[arg(short, long)]
    normalize: bool,

    /// Explicit episode ends (e.g. "0,0,1"); disables the nonzero-reward reset
    #[arg(long)]
    dones: Option<String>,

    /// Print JSON instead of one value per line
    #[arg(long)]
    json: bool,
}

pub fn run(args: DiscountArgs, defaults: &DiscountConfig, out: &mut impl Write) -> Result<()> {
    let log = get_logger("discount");

    let rewards = match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rewards from {}", path.display()))?;
            parse_rewards(&text)?
        }
        None => args.rewards,
    };
    let gamma = args.gamma.unwrap_or(defaults.gamma);
    if !(gamma > 0.0 && gamma <= 1.0) {
        log.warn(format!("gamma = {gamma} is outside (0, 1]; applying it as given"));
    }

    let mut returns = match &args.dones {
        Some(dones) => {
            let dones = parse_dones(dones)?;
            discount_episodes(&rewards, &dones, gamma)?
        }
        None => discount_rewards(&rewards, gamma),
    };
    if args.normalize || defaults.normalize {
        normalize_returns(&mut returns);
    }

    log.debug(format!("Discounted {} rewards with gamma {gamma}", rewards.len()));

    if args.json {
        let report = serde_json::json!({
            "gamma": gamma,
            "rewards": rewards,
            "returns": returns,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for r in &returns {
            writeln!(out, "{r}")?;
        }
    }

    Ok(())
}

/// Parse rewards separated by whitespace and/or commas
pub fn parse_rewards(text: &str) -> Result<Vec<Reward>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<Reward>()
                .with_context(|| format!("Invalid reward: '{t}'"))
        })
        .collect()
}

/// Parse episode-end markers: 1/0 or true/false, comma separated
pub fn parse_dones(text: &str) -> Result<Vec<bool>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match t {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            other => bail!("Invalid episode marker: '{other}'"),
        })
        .collect()
}
