//! Common types used throughout PGRL

use ndarray::Array3;

/// Reward value for a single timestep
pub type Reward = f64;

/// Discount factor applied to future rewards
pub type Gamma = f64;

/// Discount factor used when a caller does not supply one
pub const DEFAULT_GAMMA: Gamma = 0.99;

/// Image frame laid out as (height, width, channels)
pub type Frame = Array3<u8>;

/// Height of a raw Pong frame
pub const RAW_FRAME_HEIGHT: usize = 210;

/// Width of a raw Pong frame
pub const RAW_FRAME_WIDTH: usize = 160;

/// Channels of a raw Pong frame (RGB)
pub const RAW_FRAME_CHANNELS: usize = 3;

/// Number of bytes in a raw Pong frame
pub const RAW_FRAME_LEN: usize = RAW_FRAME_HEIGHT * RAW_FRAME_WIDTH * RAW_FRAME_CHANNELS;
