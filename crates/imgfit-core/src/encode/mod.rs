//! Image encoding pipeline for imgfit.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG with configurable quality (transparency is
//!   flattened onto white, since JPEG has no alpha channel)
//! - Encoding images to lossy WEBP with configurable quality, optionally
//!   carrying the alpha channel through
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::decode::DecodedImage;
//! use imgfit_core::encode::{encode, OutputFormat};
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 4]);
//! let bytes = encode(&image, OutputFormat::Jpeg, 90, false).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod jpeg;
mod webp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

pub use jpeg::encode_jpeg;
pub use webp::encode_webp;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output encoding produced by the compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JPEG - no transparency, widest compatibility.
    #[default]
    Jpeg,
    /// WEBP - lossy, usually smaller than JPEG for photos, supports alpha.
    Webp,
}

impl OutputFormat {
    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

/// Encode an image in the given format at the given quality.
///
/// `preserve_alpha` only applies to WEBP output; JPEG always flattens
/// transparency onto a white background.
///
/// # Errors
///
/// Returns `EncodeError` if the image dimensions or buffer are invalid, or
/// if the underlying encoder fails.
pub fn encode(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
    preserve_alpha: bool,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Webp => encode_webp(image, quality, preserve_alpha),
    }
}

/// Validate the dimensions and buffer length of an image before encoding.
pub(crate) fn validate_image(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected_len = (image.width as usize) * (image.height as usize) * 4;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}
