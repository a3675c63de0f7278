//! Options, result, and error types for the size-targeting compressor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, FilterType};
use crate::encode::{EncodeError, OutputFormat};

/// Default minimum quality the search will accept.
pub const DEFAULT_QUALITY_FLOOR: u8 = 10;

/// Default floor for either output edge, preventing degenerate outputs.
pub const DEFAULT_MIN_EDGE: u32 = 32;

/// Default linear scale applied per downscale step.
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.9;

/// Configuration for [`shrink_to_size`](crate::shrink::shrink_to_size).
///
/// Every tunable is an explicit field here; there is no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrinkOptions {
    /// Output encoding.
    pub format: OutputFormat,
    /// Minimum acceptable quality (1-100). The search never goes below it.
    pub quality_floor: u8,
    /// Output width never drops below this.
    pub min_width: u32,
    /// Output height never drops below this.
    pub min_height: u32,
    /// Carry the alpha channel into WEBP output. Ignored for JPEG, which
    /// always flattens transparency onto white.
    pub preserve_alpha: bool,
    /// Optional pre-pass: downscale so the width does not exceed this before
    /// any quality search runs.
    pub max_width: Option<u32>,
    /// Linear scale applied to both edges per downscale step, in (0, 1).
    pub shrink_factor: f64,
    /// Interpolation filter for all resizing.
    pub filter: FilterType,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality_floor: DEFAULT_QUALITY_FLOOR,
            min_width: DEFAULT_MIN_EDGE,
            min_height: DEFAULT_MIN_EDGE,
            preserve_alpha: true,
            max_width: None,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            filter: FilterType::Lanczos3,
        }
    }
}

impl ShrinkOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of a compression run.
#[derive(Debug, Clone, Serialize)]
pub struct ShrinkResult {
    /// Encoded output in the requested format.
    pub bytes: Vec<u8>,
    /// Quality the returned bytes were encoded at.
    pub quality: u8,
    /// Final output width in pixels.
    pub width: u32,
    /// Final output height in pixels.
    pub height: u32,
    /// Format of `bytes`.
    pub format: OutputFormat,
    /// True when `bytes.len()` is at or under the requested target. False
    /// means the floors were reached first and `bytes` is the smallest
    /// output achieved.
    pub target_met: bool,
}

/// Errors from the size-targeting compressor.
///
/// An unmet target is not an error; it is reported through
/// [`ShrinkResult::target_met`].
#[derive(Debug, Error)]
pub enum ShrinkError {
    /// The source bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The encoder rejected a valid quality/size combination.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Target size of zero bytes.
    #[error("Invalid target: target size must be greater than zero")]
    ZeroTarget,

    /// Quality floor outside the encoder's accepted range.
    #[error("Invalid target: quality floor {0} is outside 1-100")]
    QualityFloorOutOfRange(u8),

    /// A minimum dimension of zero.
    #[error("Invalid target: minimum dimensions must be at least 1x1")]
    ZeroMinDimension,

    /// Shrink factor that would not shrink (or would invert) the image.
    #[error("Invalid target: shrink factor {0} must be strictly between 0 and 1")]
    ShrinkFactorOutOfRange(f64),

    /// Minimum dimensions larger than the source image.
    #[error(
        "Invalid target: minimum dimensions {min_width}x{min_height} exceed \
         source dimensions {width}x{height}"
    )]
    MinDimensionsExceedSource {
        min_width: u32,
        min_height: u32,
        width: u32,
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ShrinkOptions::new();
        assert_eq!(options.format, OutputFormat::Jpeg);
        assert_eq!(options.quality_floor, DEFAULT_QUALITY_FLOOR);
        assert_eq!(options.min_width, DEFAULT_MIN_EDGE);
        assert_eq!(options.min_height, DEFAULT_MIN_EDGE);
        assert!(options.preserve_alpha);
        assert!(options.max_width.is_none());
        assert_eq!(options.shrink_factor, DEFAULT_SHRINK_FACTOR);
        assert_eq!(options.filter, FilterType::Lanczos3);
    }

    #[test]
    fn test_shrink_error_display() {
        let err = ShrinkError::ZeroTarget;
        assert_eq!(
            err.to_string(),
            "Invalid target: target size must be greater than zero"
        );

        let err = ShrinkError::QualityFloorOutOfRange(0);
        assert_eq!(err.to_string(), "Invalid target: quality floor 0 is outside 1-100");

        let err = ShrinkError::MinDimensionsExceedSource {
            min_width: 64,
            min_height: 64,
            width: 32,
            height: 32,
        };
        assert!(err.to_string().contains("64x64"));
        assert!(err.to_string().contains("32x32"));
    }

    #[test]
    fn test_shrink_error_from_decode() {
        let err: ShrinkError = DecodeError::InvalidFormat.into();
        assert!(matches!(err, ShrinkError::Decode(_)));
    }
}
