//! The size-targeting compression loop.

use crate::decode::{decode_image, resize, resize_to_width, scaled_dimensions};
use crate::encode::{encode, EncodeError};

use super::search::{largest_feasible, Candidate};
use super::types::{ShrinkError, ShrinkOptions, ShrinkResult};

/// Upper quality bound for every search.
const QUALITY_CEILING: u8 = 100;

/// Compress an image so its encoded size fits at or under `target_bytes`.
///
/// Quality is binary-searched first at the source resolution; only when even
/// the floor quality overshoots the budget does the image get downscaled, one
/// fixed-factor step at a time, with the quality search repeated after each
/// step. When the dimension floors are reached without fitting the budget,
/// the smallest output achieved is returned with
/// [`ShrinkResult::target_met`] set to false rather than failing.
///
/// # Arguments
///
/// * `source` - Raw JPEG or WEBP bytes
/// * `target_bytes` - Byte budget for the output (> 0)
/// * `options` - Output format, quality floor, dimension floors, etc.
///
/// # Errors
///
/// Returns `ShrinkError::Decode` for unreadable or unsupported input,
/// `ShrinkError::Encode` when an encoder rejects the image, and the
/// invalid-target variants for nonsensical requests. An unmet budget is
/// never an error.
pub fn shrink_to_size(
    source: &[u8],
    target_bytes: usize,
    options: &ShrinkOptions,
) -> Result<ShrinkResult, ShrinkError> {
    validate_options(target_bytes, options)?;

    let (decoded, _format) = decode_image(source)?;

    if options.min_width > decoded.width || options.min_height > decoded.height {
        return Err(ShrinkError::MinDimensionsExceedSource {
            min_width: options.min_width,
            min_height: options.min_height,
            width: decoded.width,
            height: decoded.height,
        });
    }

    // Optional pre-pass: never start wider than max_width. Clamped to the
    // width floor so the pre-pass cannot undercut it.
    let mut image = match options.max_width {
        Some(max_width) => {
            resize_to_width(&decoded, max_width.max(options.min_width), options.filter)?
        }
        None => decoded,
    };

    // Smallest output seen across all resolutions, kept for the not-met case
    let mut fallback: Option<(Candidate, u32, u32)> = None;

    loop {
        let outcome = largest_feasible(
            options.quality_floor,
            QUALITY_CEILING,
            target_bytes,
            |quality| encode(&image, options.format, quality, options.preserve_alpha),
        )?;

        if let Some(best) = outcome.best {
            return Ok(ShrinkResult {
                bytes: best.bytes,
                quality: best.value,
                width: image.width,
                height: image.height,
                format: options.format,
                target_met: true,
            });
        }

        if let Some(candidate) = outcome.smallest {
            let replace = match &fallback {
                None => true,
                Some((held, _, _)) => candidate.bytes.len() < held.bytes.len(),
            };
            if replace {
                fallback = Some((candidate, image.width, image.height));
            }
        }

        let (next_width, next_height) = scaled_dimensions(
            image.width,
            image.height,
            options.shrink_factor,
            options.min_width,
            options.min_height,
        );
        if (next_width, next_height) == (image.width, image.height) {
            break; // both edges at their floors
        }

        image = resize(&image, next_width, next_height, options.filter)?;
    }

    // The quality range is non-empty, so every search above ran probes and
    // recorded a fallback candidate
    let (candidate, width, height) = fallback.ok_or_else(|| {
        ShrinkError::Encode(EncodeError::EncodingFailed(
            "search produced no candidate".to_string(),
        ))
    })?;

    Ok(ShrinkResult {
        bytes: candidate.bytes,
        quality: candidate.value,
        width,
        height,
        format: options.format,
        target_met: false,
    })
}

fn validate_options(target_bytes: usize, options: &ShrinkOptions) -> Result<(), ShrinkError> {
    if target_bytes == 0 {
        return Err(ShrinkError::ZeroTarget);
    }
    if options.quality_floor == 0 || options.quality_floor > 100 {
        return Err(ShrinkError::QualityFloorOutOfRange(options.quality_floor));
    }
    if options.min_width == 0 || options.min_height == 0 {
        return Err(ShrinkError::ZeroMinDimension);
    }
    if !(options.shrink_factor > 0.0 && options.shrink_factor < 1.0) {
        return Err(ShrinkError::ShrinkFactorOutOfRange(options.shrink_factor));
    }
    Ok(())
}
