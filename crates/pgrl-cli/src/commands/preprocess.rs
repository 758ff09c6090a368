//! Frame preprocessing command
//!
//! Frames are raw interleaved RGB bytes, 210x160x3, as emitted by the Pong
//! environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pgrl_core::{get_logger, Frame, RAW_FRAME_CHANNELS, RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH};
use pgrl_rl::{frame_from_raw, preprocess_frame, FrameConfig};

#[derive(Args)]
pub struct PreprocessArgs {
    /// Raw current frame
    #[arg(long)]
    frame: PathBuf,

    /// Previously processed frame (output of --prev-out on the last call)
    #[arg(long)]
    prev: Option<PathBuf>,

    /// Where to write the difference frame
    #[arg(short, long)]
    out: PathBuf,

    /// Where to write the processed current frame for the next call
    #[arg(long)]
    prev_out: Option<PathBuf>,
}

pub fn run(args: PreprocessArgs, config: &FrameConfig) -> Result<()> {
    let log = get_logger("preprocess");

    let raw = read_frame(
        &args.frame,
        (RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH, RAW_FRAME_CHANNELS),
    )?;
    let prev = match &args.prev {
        Some(path) => Some(read_frame(path, config.processed_shape(RAW_FRAME_WIDTH))?),
        None => None,
    };

    let (next_prev, policy_input) = preprocess_frame(prev.as_ref(), raw.view(), config)?;

    write_frame(&args.out, &policy_input)?;
    if let Some(path) = &args.prev_out {
        write_frame(path, &next_prev)?;
    }

    let changed = policy_input.iter().filter(|&&p| p != 0).count();
    log.info(format!(
        "Processed frame {:?} -> {:?}, {changed} changed pixels",
        raw.dim(),
        policy_input.dim()
    ));

    Ok(())
}

fn read_frame(path: &Path, shape: (usize, usize, usize)) -> Result<Frame> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read frame {}", path.display()))?;
    frame_from_raw(bytes, shape).with_context(|| format!("Bad frame file {}", path.display()))
}

fn write_frame(path: &Path, frame: &Frame) -> Result<()> {
    let bytes: Vec<u8> = frame.iter().copied().collect();
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
