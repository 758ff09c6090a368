//! Pong frame preprocessing
//!
//! Raw 210x160x3 frames are cropped to the play field, downsampled, reduced
//! to a single binarized channel and differenced against the previous frame.
//! The previous frame is passed in and handed back; nothing is kept here.

use ndarray::{s, Array3, ArrayView3, Zip};
use serde::{Deserialize, Serialize};

use pgrl_core::{Frame, PgrlError, Result};

/// Preprocessing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// First row kept (inclusive)
    pub crop_top: usize,
    /// Last row kept (exclusive)
    pub crop_bottom: usize,
    /// Downsampling step along both spatial axes
    pub stride: usize,
    /// Pixel value erased as background
    pub background: u8,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            crop_top: 35,
            crop_bottom: 195,
            stride: 2,
            background: 144,
        }
    }
}

impl FrameConfig {
    /// Shape of a processed frame given the raw frame width
    pub fn processed_shape(&self, width: usize) -> (usize, usize, usize) {
        let rows = (self.crop_bottom.saturating_sub(self.crop_top)).div_ceil(self.stride.max(1));
        let cols = width.div_ceil(self.stride.max(1));
        (rows, cols, 1)
    }

    fn validate(&self, height: usize, channels: usize) -> Result<()> {
        if channels == 0 {
            return Err(PgrlError::Shape("frame has no channels".to_string()));
        }
        if self.stride == 0 {
            return Err(PgrlError::Shape("stride must be at least 1".to_string()));
        }
        if self.crop_top >= self.crop_bottom || self.crop_bottom > height {
            return Err(PgrlError::Shape(format!(
                "crop rows {}..{} do not fit frame height {}",
                self.crop_top, self.crop_bottom, height
            )));
        }
        Ok(())
    }
}

/// Preprocess one frame.
///
/// Returns `(new_prev, policy_input)`. `new_prev` is the processed current
/// frame and must be passed back as `prev` on the next call. `policy_input`
/// is `current - prev` with wrapping `u8` arithmetic, or all zeros when
/// there is no previous frame.
pub fn preprocess_frame(
    prev: Option<&Frame>,
    frame: ArrayView3<'_, u8>,
    config: &FrameConfig,
) -> Result<(Frame, Frame)> {
    let (height, _, channels) = frame.dim();
    config.validate(height, channels)?;

    let stride = config.stride as isize;
    let background = config.background;
    let img = frame
        .slice(s![config.crop_top..config.crop_bottom;stride, ..;stride, 0..1])
        .mapv(|p| if p == background || p == 0 { 0u8 } else { 255 });

    let policy_input = match prev {
        Some(prev) => {
            if prev.dim() != img.dim() {
                return Err(PgrlError::Shape(format!(
                    "previous frame {:?} does not match processed frame {:?}",
                    prev.dim(),
                    img.dim()
                )));
            }
            Zip::from(&img)
                .and(prev)
                .map_collect(|&cur, &old| cur.wrapping_sub(old))
        }
        None => Array3::zeros(img.dim()),
    };

    Ok((img, policy_input))
}

/// Flatten a frame in row-major order as network input
pub fn policy_features(frame: &Frame) -> Vec<f32> {
    frame.iter().map(|&p| f32::from(p)).collect()
}

/// Build a frame from interleaved bytes laid out as (height, width, channels)
pub fn frame_from_raw(bytes: Vec<u8>, shape: (usize, usize, usize)) -> Result<Frame> {
    let len = bytes.len();
    Array3::from_shape_vec(shape, bytes).map_err(|e| {
        PgrlError::Shape(format!("{len} bytes do not form a {shape:?} frame: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgrl_core::{RAW_FRAME_CHANNELS, RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH};

    fn raw_frame(fill: u8) -> Frame {
        Array3::from_elem((RAW_FRAME_HEIGHT, RAW_FRAME_WIDTH, RAW_FRAME_CHANNELS), fill)
    }

    #[test]
    fn test_output_shape() {
        let config = FrameConfig::default();
        let (prev, input) = preprocess_frame(None, raw_frame(0).view(), &config).unwrap();
        assert_eq!(prev.dim(), (80, 80, 1));
        assert_eq!(input.dim(), (80, 80, 1));
        assert_eq!(config.processed_shape(RAW_FRAME_WIDTH), (80, 80, 1));
    }

    #[test]
    fn test_first_frame_has_zero_input() {
        let (prev, input) =
            preprocess_frame(None, raw_frame(200).view(), &FrameConfig::default()).unwrap();
        assert!(prev.iter().all(|&p| p == 255));
        assert!(input.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_background_erased_and_objects_binarized() {
        let mut frame = raw_frame(144);
        // Ball inside the play field, on a sampled pixel
        frame[[35 + 10, 20, 0]] = 236;
        // Score area above the crop is dropped
        frame[[5, 20, 0]] = 236;
        // Only channel 0 is kept
        frame[[35 + 12, 20, 1]] = 17;

        let (prev, _) = preprocess_frame(None, frame.view(), &FrameConfig::default()).unwrap();
        assert_eq!(prev[[5, 10, 0]], 255);
        assert_eq!(prev[[6, 10, 0]], 0);
        assert_eq!(prev.iter().filter(|&&p| p == 255).count(), 1);
    }

    #[test]
    fn test_odd_rows_and_columns_skipped() {
        let mut frame = raw_frame(144);
        frame[[36, 1, 0]] = 92;
        let (prev, _) = preprocess_frame(None, frame.view(), &FrameConfig::default()).unwrap();
        assert!(prev.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_difference_wraps() {
        let config = FrameConfig::default();
        let mut first = raw_frame(144);
        first[[35, 0, 0]] = 236;
        let mut second = raw_frame(144);
        second[[35, 2, 0]] = 236;

        let (prev, _) = preprocess_frame(None, first.view(), &config).unwrap();
        let (next_prev, input) = preprocess_frame(Some(&prev), second.view(), &config).unwrap();

        // Ball left (0, 0) and arrived at (0, 1)
        assert_eq!(input[[0, 0, 0]], 0u8.wrapping_sub(255));
        assert_eq!(input[[0, 0, 0]], 1);
        assert_eq!(input[[0, 1, 0]], 255);
        assert_eq!(input.iter().filter(|&&p| p != 0).count(), 2);
        assert_eq!(next_prev[[0, 1, 0]], 255);
    }

    #[test]
    fn test_same_frame_twice_gives_zero_input() {
        let config = FrameConfig::default();
        let mut frame = raw_frame(144);
        frame[[101, 40, 0]] = 92;
        let (prev, _) = preprocess_frame(None, frame.view(), &config).unwrap();
        let (_, input) = preprocess_frame(Some(&prev), frame.view(), &config).unwrap();
        assert!(input.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_shape_errors() {
        let config = FrameConfig::default();

        let short = Array3::<u8>::zeros((100, 160, 3));
        assert!(matches!(
            preprocess_frame(None, short.view(), &config),
            Err(PgrlError::Shape(_))
        ));

        let no_channels = Array3::<u8>::zeros((210, 160, 0));
        assert!(preprocess_frame(None, no_channels.view(), &config).is_err());

        let zero_stride = FrameConfig {
            stride: 0,
            ..FrameConfig::default()
        };
        assert!(preprocess_frame(None, raw_frame(0).view(), &zero_stride).is_err());

        let wrong_prev = Array3::<u8>::zeros((40, 40, 1));
        assert!(matches!(
            preprocess_frame(Some(&wrong_prev), raw_frame(0).view(), &config),
            Err(PgrlError::Shape(_))
        ));
    }

    #[test]
    fn test_custom_config() {
        let config = FrameConfig {
            crop_top: 0,
            crop_bottom: 4,
            stride: 1,
            background: 7,
        };
        let mut frame = Array3::<u8>::from_elem((4, 3, 1), 7);
        frame[[3, 2, 0]] = 1;
        let (prev, _) = preprocess_frame(None, frame.view(), &config).unwrap();
        assert_eq!(prev.dim(), (4, 3, 1));
        assert_eq!(prev[[3, 2, 0]], 255);
        assert_eq!(prev.iter().filter(|&&p| p == 255).count(), 1);
    }

    #[test]
    fn test_policy_features_row_major() {
        let mut frame = Array3::<u8>::zeros((2, 2, 1));
        frame[[0, 1, 0]] = 255;
        frame[[1, 0, 0]] = 1;
        assert_eq!(policy_features(&frame), vec![0.0, 255.0, 1.0, 0.0]);
    }

    #[test]
    fn test_frame_from_raw() {
        let frame = frame_from_raw(vec![1, 2, 3, 4, 5, 6], (1, 2, 3)).unwrap();
        assert_eq!(frame[[0, 1, 0]], 4);

        let err = frame_from_raw(vec![0; 5], (1, 2, 3)).unwrap_err();
        assert!(matches!(err, PgrlError::Shape(_)));
    }
}
