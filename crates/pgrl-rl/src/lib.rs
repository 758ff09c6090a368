//! PGRL RL - helpers for a policy-gradient Pong training loop
//!
//! This crate provides reward discounting, frame preprocessing and
//! reproducible seeding. The training loop itself lives elsewhere.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]

pub mod discount;
pub mod history;
pub mod preprocess;
pub mod seed;

pub use discount::{discount_episodes, discount_rewards, normalize_returns};
pub use history::RewardHistory;
pub use preprocess::{frame_from_raw, policy_features, preprocess_frame, FrameConfig};
pub use seed::{global_seeds, set_global_seeds, RngStream, SeedSequence};
