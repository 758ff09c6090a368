//! Configuration loading for the PGRL CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File};
use pgrl_core::{Gamma, LoggingConfig, DEFAULT_GAMMA};
use pgrl_rl::FrameConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub discount: DiscountConfig,
    pub frame: FrameConfig,
    pub seed: SeedConfig,
    /// Config file the values were read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountConfig {
    pub gamma: Gamma,
    pub normalize: bool,
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            normalize: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// `explicit` overrides the config file search. Runs before logging is
    /// set up; the file used is recorded in `source` for later reporting.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

        // Add config file if it exists
        if let Some(path) = &config_path {
            builder = builder.add_source(File::from(path.clone()).required(explicit.is_some()));
        }

        // Add environment variables with PGRL__ prefix
        builder = builder.add_source(
            Environment::with_prefix("PGRL")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder
            .build()?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.source = config_path;

        Ok(config)
    }

    /// Find the configuration file
    pub fn find_config_file() -> Option<PathBuf> {
        // Check in order: PGRL_CONFIG env, ./pgrl.toml, ~/.config/pgrl/pgrl.toml
        if let Ok(path) = std::env::var("PGRL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from("pgrl.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config").join("pgrl").join("pgrl.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
