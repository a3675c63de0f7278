//! Image decoding pipeline for imgfit.
//!
//! This module provides functionality for:
//! - Detecting and decoding JPEG and WEBP sources
//! - EXIF orientation correction for JPEG inputs
//! - Resizing for the downscale fallback
//!
//! All operations are synchronous and single-threaded; each decoded image
//! is owned exclusively by its compression run.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let (image, format) = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} {:?}", image.width, image.height, format);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, detect_format, get_orientation};
pub use resize::{resize, resize_to_width, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, SourceFormat};
