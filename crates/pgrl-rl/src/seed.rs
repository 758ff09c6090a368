//! Process-wide seeding
//!
//! The process holds one current root seed. Each consumer of randomness asks
//! the `SeedSequence` for its own generator and threads it explicitly, so
//! every random draw is reproducible from the root seed.

use std::sync::RwLock;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use pgrl_core::{PgrlError, Result};

static GLOBAL_SEED: RwLock<Option<u64>> = RwLock::new(None);

/// Independent random streams derived from the root seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RngStream {
    /// Array/numeric sampling
    Numeric,
    /// General purpose sampling (shuffles, coin flips)
    General,
    /// Model parameter initialization and action sampling
    Model,
}

impl RngStream {
    pub const ALL: [RngStream; 3] = [RngStream::Numeric, RngStream::General, RngStream::Model];

    pub fn name(self) -> &'static str {
        match self {
            RngStream::Numeric => "numeric",
            RngStream::General => "general",
            RngStream::Model => "model",
        }
    }

    fn salt(self) -> u64 {
        match self {
            RngStream::Numeric => 1,
            RngStream::General => 2,
            RngStream::Model => 3,
        }
    }
}

/// Root seed and per-stream generator factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSequence {
    seed: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fresh generator for `stream`, identical for identical (seed, stream)
    pub fn rng(&self, stream: RngStream) -> StdRng {
        StdRng::seed_from_u64(mix(self.seed, stream.salt()))
    }
}

// splitmix64 finalizer over seed and stream salt
fn mix(seed: u64, salt: u64) -> u64 {
    let mut z = seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Set the process-wide root seed.
///
/// Call at startup before anything draws randomness. Calling again replaces
/// the root seed; generators obtained earlier keep their own state.
pub fn set_global_seeds(seed: u64) -> Result<SeedSequence> {
    let mut current = GLOBAL_SEED
        .write()
        .map_err(|_| PgrlError::Seed("global seed lock poisoned".to_string()))?;

    match current.replace(seed) {
        None => info!(seed, "Global seed set"),
        Some(previous) if previous != seed => info!(previous, seed, "Global seed reset"),
        Some(_) => debug!(seed, "Global seed unchanged"),
    }

    Ok(SeedSequence::new(seed))
}

/// Sequence for the current root seed, if one was set
pub fn global_seeds() -> Option<SeedSequence> {
    GLOBAL_SEED
        .read()
        .ok()
        .and_then(|seed| *seed)
        .map(SeedSequence::new)
}
