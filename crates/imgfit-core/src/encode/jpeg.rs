//! JPEG encoding.
//!
//! Uses the `image` crate's JPEG encoder with configurable quality. JPEG has
//! no alpha channel, so transparent sources are flattened onto an opaque
//! white background before encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{validate_image, EncodeError};
use crate::decode::DecodedImage;

/// Background the alpha channel is composited onto for JPEG output.
const FLATTEN_BACKGROUND: u8 = 255; // white

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The source image (RGBA; alpha is flattened onto white)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let rgb = flatten_to_rgb(&image.pixels);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Composite RGBA pixels onto the flatten background, dropping alpha.
///
/// Opaque pixels pass through untouched; partially transparent ones are
/// alpha-blended against white with rounding.
fn flatten_to_rgb(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = px[3] as u16;
        if a == 255 {
            rgb.extend_from_slice(&px[0..3]);
        } else {
            let bg = FLATTEN_BACKGROUND as u16;
            for &c in &px[0..3] {
                let blended = (c as u16 * a + bg * (255 - a) + 127) / 255;
                rgb.push(blended as u8);
            }
        }
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    /// Strategy for generating quality values.
    fn quality_strategy() -> impl Strategy<Value = u8> {
        1u8..=100
    }

    proptest! {
        /// Property: Encoding always produces a valid JPEG for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in quality_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let image = DecodedImage::new(width, height, vec![128u8; size]);

            let jpeg_bytes = encode_jpeg(&image, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8], "Should have SOI marker");
            let len = jpeg_bytes.len();
            prop_assert!(len >= 4, "JPEG should have at least 4 bytes");
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in quality_strategy(),
        ) {
            let size = (width as usize) * (height as usize) * 4;
            let image = DecodedImage::new(width, height, vec![100u8; size]);

            let first = encode_jpeg(&image, quality).unwrap();
            let second = encode_jpeg(&image, quality).unwrap();

            prop_assert_eq!(first, second, "Same input should produce same output");
        }

        /// Property: Flattening never changes buffer arithmetic.
        #[test]
        fn prop_flatten_length(
            pixels in prop::collection::vec(any::<u8>(), 0..400)
                .prop_map(|mut v| { v.truncate(v.len() / 4 * 4); v }),
        ) {
            let rgb = flatten_to_rgb(&pixels);
            prop_assert_eq!(rgb.len(), pixels.len() / 4 * 3);
        }

        /// Property: All quality values produce valid output after clamping.
        #[test]
        fn prop_all_quality_values_work(quality in 0u8..=255) {
            let image = DecodedImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
            let result = encode_jpeg(&image, quality);
            prop_assert!(result.is_ok(), "Quality {} should work after clamping", quality);
        }
    }
}
