//! Decoding of JPEG and WEBP sources with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageFormat;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation, SourceFormat};

/// Decode JPEG or WEBP bytes into an RGBA pixel buffer.
///
/// JPEG sources are rotated/flipped upright according to their EXIF
/// orientation before being returned, so every later resize and encode
/// step operates on upright pixels.
///
/// # Arguments
///
/// * `bytes` - Raw encoded image bytes
///
/// # Returns
///
/// The decoded image together with the detected source format.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognizable
/// image, `DecodeError::UnsupportedFormat` for recognized formats other than
/// JPEG and WEBP, and `DecodeError::CorruptedFile` when decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<(DecodedImage, SourceFormat), DecodeError> {
    let format = detect_format(bytes)?;

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::with_format(
        cursor,
        match format {
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Webp => ImageFormat::WebP,
        },
    );

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    // WEBP carries no EXIF orientation we care about; JPEG often does
    let oriented = match format {
        SourceFormat::Jpeg => apply_orientation(img, extract_orientation(bytes)),
        SourceFormat::Webp => img,
    };

    let rgba = oriented.into_rgba8();
    Ok((DecodedImage::from_rgba_image(rgba), format))
}

/// Detect the source format from magic bytes without decoding.
pub fn detect_format(bytes: &[u8]) -> Result<SourceFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    match format {
        ImageFormat::Jpeg => Ok(SourceFormat::Jpeg),
        ImageFormat::WebP => Ok(SourceFormat::Webp),
        other => {
            let name = other
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("unknown")
                .to_string();
            Err(DecodeError::UnsupportedFormat(name))
        }
    }
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract EXIF orientation value from JPEG bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
