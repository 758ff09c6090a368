//! Reward discounting
//!
//! `discount_rewards` treats every nonzero reward as the end of a point, which
//! holds for Pong's sparse +1/-1 signal. Callers with a different reward shape
//! should pass explicit boundaries to `discount_episodes` instead.

use pgrl_core::{Gamma, PgrlError, Result, Reward};

/// Added to the standard deviation in `normalize_returns`
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Discounted returns with a reset at every nonzero reward.
///
/// Scans backward keeping a running sum. A nonzero reward zeroes the sum
/// before its own value is folded in, so `output[i] == rewards[i]` wherever
/// `rewards[i] != 0`. `gamma` is not validated.
///
/// ```
/// use pgrl_rl::discount::discount_rewards;
///
/// let returns = discount_rewards(&[0.0, 0.0, 1.0], 0.5);
/// assert_eq!(returns, vec![0.25, 0.5, 1.0]);
/// ```
pub fn discount_rewards(rewards: &[Reward], gamma: Gamma) -> Vec<Reward> {
    let mut discounted = vec![0.0; rewards.len()];
    let mut running_add = 0.0;

    for (out, &reward) in discounted.iter_mut().zip(rewards).rev() {
        if reward != 0.0 {
            running_add = 0.0;
        }
        running_add = running_add * gamma + reward;
        *out = running_add;
    }

    discounted
}

/// Discounted returns with resets at explicit episode ends.
///
/// `dones[i]` marks timestep `i` as the last of its episode; the running sum
/// is cleared before `rewards[i]` is added. Nonzero rewards do not reset.
pub fn discount_episodes(rewards: &[Reward], dones: &[bool], gamma: Gamma) -> Result<Vec<Reward>> {
    if dones.len() != rewards.len() {
        return Err(PgrlError::LengthMismatch {
            expected: rewards.len(),
            actual: dones.len(),
        });
    }

    let mut discounted = vec![0.0; rewards.len()];
    let mut running_add = 0.0;

    for ((out, &reward), &done) in discounted.iter_mut().zip(rewards).zip(dones).rev() {
        if done {
            running_add = 0.0;
        }
        running_add = running_add * gamma + reward;
        *out = running_add;
    }

    Ok(discounted)
}

/// Standardize returns in place: `(x - mean) / (std + 1e-9)`
pub fn normalize_returns(returns: &mut [Reward]) {
    if returns.is_empty() {
        return;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let denom = variance.sqrt() + NORMALIZE_EPSILON;

    for r in returns.iter_mut() {
        *r = (*r - mean) / denom;
    }
}
