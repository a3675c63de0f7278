//! Lossy WEBP encoding.
//!
//! The `image` crate only ships a lossless WEBP encoder, so quality-driven
//! encoding goes through the `webp` crate (libwebp bindings) instead. Alpha
//! can be carried through or dropped depending on the caller.

use webp::Encoder;

use super::{validate_image, EncodeError};
use crate::decode::DecodedImage;

/// Encode an image to lossy WEBP bytes.
///
/// # Arguments
///
/// * `image` - The source image
/// * `quality` - WEBP quality (1-100, where 100 is highest quality)
/// * `preserve_alpha` - Keep the alpha channel in the output; when false (or
///   when the source is fully opaque) the pixels are encoded as RGB
///
/// # Errors
///
/// Returns `EncodeError::EncodingFailed` if libwebp rejects the image, and
/// the usual validation errors for bad dimensions or buffer lengths.
pub fn encode_webp(
    image: &DecodedImage,
    quality: u8,
    preserve_alpha: bool,
) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    let quality = quality.clamp(1, 100) as f32;

    let encoded = if preserve_alpha && image.has_alpha() {
        let encoder = Encoder::from_rgba(&image.pixels, image.width, image.height);
        encoder
            .encode_simple(false, quality)
            .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?
    } else {
        let rgb = drop_alpha(&image.pixels);
        let encoder = Encoder::from_rgb(&rgb, image.width, image.height);
        encoder
            .encode_simple(false, quality)
            .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?
    };

    Ok(encoded.to_vec())
}

/// Strip the alpha channel without compositing.
fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[0..3]);
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
