//! Integration tests for the training-loop helpers
//!
//! These tests drive the helpers the way a rollout loop would.

#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]

use ndarray::Array3;
use pgrl_core::{Frame, DEFAULT_GAMMA, RAW_FRAME_CHANNELS, RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH};
use pgrl_rl::{
    discount_episodes, discount_rewards, policy_features, preprocess_frame, FrameConfig,
    RewardHistory, RngStream, SeedSequence,
};
use rand::Rng;

/// Raw frame with the background colour and a ball at (row, col)
fn frame_with_ball(row: usize, col: usize) -> Frame {
    let mut frame = Array3::from_elem(
        (RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH, RAW_FRAME_CHANNELS),
        144u8,
    );
    for c in 0..RAW_FRAME_CHANNELS {
        frame[[row, col, c]] = 236;
    }
    frame
}

/// Random sparse Pong-like reward stream
fn simulate_rewards(rng: &mut impl Rng, steps: usize) -> Vec<f64> {
    (0..steps)
        .map(|_| match rng.gen_range(0..20) {
            0 => 1.0,
            1 => -1.0,
            _ => 0.0,
        })
        .collect()
}

#[test]
fn test_documented_examples() {
    assert_eq!(discount_rewards(&[0.0, 0.0, 1.0], 0.5), vec![0.25, 0.5, 1.0]);
    assert_eq!(
        discount_rewards(&[1.0, 0.0, 0.0, -1.0], 1.0),
        vec![1.0, -1.0, -1.0, -1.0]
    );

    // Every nonzero reward is a boundary, so a run of +1s never accumulates
    assert_eq!(discount_rewards(&[1.0, 1.0, 1.0], 0.99), vec![1.0, 1.0, 1.0]);

    // The same stream as a single episode gives the plain discounted sum
    let single = discount_episodes(&[1.0, 1.0, 1.0], &[false, false, true], 0.99).unwrap();
    let expected = [2.9701, 1.99, 1.0];
    for (a, e) in single.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9);
    }
}

#[test]
fn test_rollout_loop() {
    let seeds = SeedSequence::new(7);
    let mut rng = seeds.rng(RngStream::General);
    let config = FrameConfig::default();

    let mut prev: Option<Frame> = None;
    let mut history = RewardHistory::new();
    let mut inputs = Vec::new();

    for step in 0..40 {
        // Ball moves two pixels right per step along an even row
        let raw = frame_with_ball(101, (2 * step) % RAW_FRAME_WIDTH);
        let (next_prev, policy_input) = preprocess_frame(prev.as_ref(), raw.view(), &config).unwrap();
        prev = Some(next_prev);
        inputs.push(policy_features(&policy_input));

        let reward = if step % 10 == 9 {
            if rng.gen_bool(0.5) {
                1.0
            } else {
                -1.0
            }
        } else {
            0.0
        };
        history.push(reward);
    }

    assert_eq!(inputs.len(), 40);
    assert!(inputs.iter().all(|x| x.len() == 80 * 80));
    // First step has nothing to diff against
    assert!(inputs[0].iter().all(|&x| x == 0.0));
    // Every later step sees the ball leave one cell and enter another
    for x in &inputs[1..] {
        assert_eq!(x.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    let raw_rewards = history.as_slice().to_vec();
    let returns = history.finish(DEFAULT_GAMMA, false);
    assert!(history.is_empty());
    assert_eq!(returns.len(), 40);

    for (i, (r, g)) in raw_rewards.iter().zip(&returns).enumerate() {
        if *r != 0.0 {
            assert_eq!(g, r, "boundary at {i}");
        } else {
            // Returns keep the sign of the point that ends the segment
            let end = raw_rewards[i..].iter().find(|x| **x != 0.0).unwrap();
            assert_eq!(g.signum(), end.signum());
            assert!(g.abs() < 1.0);
        }
    }
}

#[test]
fn test_seeded_rollouts_reproduce() {
    let run = |seed: u64| {
        let mut rng = SeedSequence::new(seed).rng(RngStream::Numeric);
        let rewards = simulate_rewards(&mut rng, 500);
        discount_rewards(&rewards, DEFAULT_GAMMA)
    };

    assert_eq!(run(3), run(3));
    assert_ne!(run(3), run(4));
}

#[test]
fn test_length_preserved_for_random_streams() {
    let mut rng = SeedSequence::new(11).rng(RngStream::General);
    for steps in [0, 1, 2, 17, 256] {
        let rewards = simulate_rewards(&mut rng, steps);
        let returns = discount_rewards(&rewards, 0.9);
        assert_eq!(returns.len(), rewards.len());
        for (r, g) in rewards.iter().zip(&returns) {
            if *r != 0.0 {
                assert_eq!(r, g);
            }
        }
    }
}

#[test]
fn test_concurrent_discounting() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut rng = SeedSequence::new(seed).rng(RngStream::General);
                let rewards = simulate_rewards(&mut rng, 1000);
                (
                    discount_rewards(&rewards, 0.99),
                    discount_rewards(&rewards, 0.99),
                )
            })
        })
        .collect();

    for handle in handles {
        let (a, b) = handle.join().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1000);
    }
}

#[test]
fn test_frame_config_partial_json() {
    let config: FrameConfig = serde_json::from_str(r#"{"stride": 4}"#).unwrap();
    assert_eq!(config.stride, 4);
    assert_eq!(config.crop_top, 35);
    assert_eq!(config.processed_shape(RAW_FRAME_WIDTH), (40, 40, 1));
}
