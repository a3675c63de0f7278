//! Image resizing for the downscale fallback.
//!
//! Provides exact-dimension resizing via the `image` crate plus the
//! dimension arithmetic for proportional shrink steps. All functions return
//! new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// Alpha is resampled along with the color channels, so transparency
/// survives every shrink step.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either dimension is zero and
/// `DecodeError::CorruptedFile` if the pixel buffer cannot be reinterpreted.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Scale an image so its width does not exceed `max_width`, preserving
/// aspect ratio. Images already narrow enough are returned unchanged.
pub fn resize_to_width(
    image: &DecodedImage,
    max_width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    if image.width <= max_width {
        return Ok(image.clone());
    }

    let ratio = max_width as f64 / image.width as f64;
    let new_height = ((image.height as f64 * ratio).round() as u32).max(1);

    resize(image, max_width, new_height, filter)
}

/// Compute the next proportional shrink step.
///
/// Both edges are multiplied by `factor` and clamped to their floors. When
/// rounding produces no change while an edge is still above its floor, that
/// edge steps down by one pixel so the caller always makes progress. An edge
/// already at or below its floor stays put; the input dimensions come back
/// unchanged only when neither edge can shrink.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    factor: f64,
    min_width: u32,
    min_height: u32,
) -> (u32, u32) {
    (
        scaled_edge(width, factor, min_width),
        scaled_edge(height, factor, min_height),
    )
}

fn scaled_edge(edge: u32, factor: f64, min_edge: u32) -> u32 {
    if edge <= min_edge {
        return edge;
    }

    let scaled = ((edge as f64 * factor).round() as u32).clamp(min_edge, edge);
    if scaled == edge {
        edge - 1
    } else {
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        // Simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_preserves_alpha() {
        let mut img = create_test_image(16, 16);
        // Punch a fully transparent hole in the middle
        for y in 4..12u32 {
            for x in 4..12u32 {
                let idx = ((y * 16 + x) * 4 + 3) as usize;
                img.pixels[idx] = 0;
            }
        }

        let resized = resize(&img, 8, 8, FilterType::Bilinear).unwrap();
        assert!(resized.has_alpha());
    }

    #[test]
    fn test_resize_to_width_downscale() {
        let img = create_test_image(3000, 2000);
        let resized = resize_to_width(&img, 1280, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 1280);
        assert_eq!(resized.height, 853); // 2000 * (1280/3000) ≈ 853
    }

    #[test]
    fn test_resize_to_width_already_narrow() {
        let img = create_test_image(100, 50);
        let resized = resize_to_width(&img, 1280, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_to_width_zero_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_width(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_scaled_dimensions_basic() {
        let (w, h) = scaled_dimensions(1000, 500, 0.9, 32, 32);
        assert_eq!(w, 900);
        assert_eq!(h, 450);
    }

    #[test]
    fn test_scaled_dimensions_clamps_to_floor() {
        let (w, h) = scaled_dimensions(40, 40, 0.5, 32, 32);
        assert_eq!(w, 32);
        assert_eq!(h, 32);
    }

    #[test]
    fn test_scaled_dimensions_at_floor_unchanged() {
        let (w, h) = scaled_dimensions(32, 32, 0.9, 32, 32);
        assert_eq!((w, h), (32, 32));
    }

    #[test]
    fn test_scaled_dimensions_guarantees_progress() {
        // 0.99 of 33 rounds back to 33; must still step down
        let (w, h) = scaled_dimensions(33, 33, 0.99, 32, 32);
        assert!(w < 33);
        assert!(h < 33);
        assert!(w >= 32 && h >= 32);
    }

    #[test]
    fn test_scaled_dimensions_edge_below_floor_stays() {
        // Height pushed under its floor by a max-width pre-pass must not
        // panic or grow back
        let (w, h) = scaled_dimensions(100, 10, 0.9, 32, 32);
        assert_eq!(w, 90);
        assert_eq!(h, 10);
    }

    #[test]
    fn test_scaled_dimensions_mixed_floors() {
        // Width already at its floor, height still shrinking
        let (w, h) = scaled_dimensions(32, 100, 0.9, 32, 32);
        assert_eq!(w, 32);
        assert_eq!(h, 90);
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }
}
