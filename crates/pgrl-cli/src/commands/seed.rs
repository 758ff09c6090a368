//! Seeding command

use anyhow::{anyhow, Result};
use clap::Args;
use pgrl_rl::{set_global_seeds, RngStream};
use rand::Rng;
use tracing::info;

use crate::config::SeedConfig;

#[derive(Args)]
pub struct SeedArgs {
    /// Root seed (defaults to seed.value from config)
    seed: Option<u64>,

    /// Number of samples to print per stream
    #[arg(short, long, default_value = "3")]
    samples: usize,
}

pub fn run(args: SeedArgs, defaults: &SeedConfig) -> Result<()> {
    let seed = args
        .seed
        .or(defaults.value)
        .ok_or_else(|| anyhow!("No seed given and seed.value is not configured"))?;

    let seeds = set_global_seeds(seed)?;
    info!(seed, "Seeded {} streams", RngStream::ALL.len());

    println!("Seed: {}", seeds.seed());
    for stream in RngStream::ALL {
        let mut rng = seeds.rng(stream);
        let draws: Vec<String> = (0..args.samples)
            .map(|_| format!("{:.6}", rng.gen::<f64>()))
            .collect();
        println!("  {:<8} {}", stream.name(), draws.join(" "));
    }

    Ok(())
}
