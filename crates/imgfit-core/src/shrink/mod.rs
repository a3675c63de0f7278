//! Size-targeting compression for imgfit.
//!
//! This module provides the core algorithm: binary-search encoder quality
//! for the largest value that fits the byte budget, and fall back to
//! proportional downscaling when even the floor quality overshoots.
//!
//! The search itself is format-agnostic (see [`search::largest_feasible`]);
//! the loop in [`shrink_to_size`] wires it to the JPEG/WEBP encoders and the
//! resize fallback.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::shrink::{shrink_to_size, ShrinkOptions};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let result = shrink_to_size(&bytes, 70 * 1024, &ShrinkOptions::default()).unwrap();
//! println!(
//!     "{} bytes at quality {} ({}x{})",
//!     result.bytes.len(),
//!     result.quality,
//!     result.width,
//!     result.height
//! );
//! ```

mod fit;
pub mod search;
mod types;

pub use fit::shrink_to_size;
pub use types::{
    ShrinkError, ShrinkOptions, ShrinkResult, DEFAULT_MIN_EDGE, DEFAULT_QUALITY_FLOOR,
    DEFAULT_SHRINK_FACTOR,
};
