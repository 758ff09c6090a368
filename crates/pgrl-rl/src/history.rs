//! Per-timestep reward history for a rollout

use pgrl_core::{Gamma, Reward};
use tracing::debug;

use crate::discount::{discount_rewards, normalize_returns};

/// Rewards collected one timestep at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardHistory {
    rewards: Vec<Reward>,
}

impl RewardHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history with room for `capacity` timesteps
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rewards: Vec::with_capacity(capacity),
        }
    }

    /// Record the reward of the next timestep
    pub fn push(&mut self, reward: Reward) {
        self.rewards.push(reward);
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn as_slice(&self) -> &[Reward] {
        &self.rewards
    }

    /// Undiscounted sum of all rewards
    pub fn total(&self) -> Reward {
        self.rewards.iter().sum()
    }

    /// Number of points played (nonzero rewards)
    pub fn nonzero_count(&self) -> usize {
        self.rewards.iter().filter(|r| **r != 0.0).count()
    }

    pub fn clear(&mut self) {
        self.rewards.clear();
    }

    /// Discounted returns, resetting at each nonzero reward
    pub fn discounted(&self, gamma: Gamma) -> Vec<Reward> {
        discount_rewards(&self.rewards, gamma)
    }

    /// Discounted (optionally normalized) returns; empties the history
    pub fn finish(&mut self, gamma: Gamma, normalize: bool) -> Vec<Reward> {
        let mut returns = self.discounted(gamma);
        if normalize {
            normalize_returns(&mut returns);
        }
        debug!(
            steps = returns.len(),
            points = self.nonzero_count(),
            total = self.total(),
            "Rollout finished"
        );
        self.clear();
        returns
    }
}

impl Extend<Reward> for RewardHistory {
    fn extend<I: IntoIterator<Item = Reward>>(&mut self, iter: I) {
        self.rewards.extend(iter);
    }
}

impl FromIterator<Reward> for RewardHistory {
    fn from_iter<I: IntoIterator<Item = Reward>>(iter: I) -> Self {
        Self {
            rewards: iter.into_iter().collect(),
        }
    }
}
