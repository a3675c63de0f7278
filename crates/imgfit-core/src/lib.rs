//! imgfit Core - Compress images to a target file size
//!
//! This crate decodes a JPEG or WEBP image, binary-searches encoder quality
//! for the largest value whose output fits a caller-specified byte budget,
//! and falls back to proportional downscaling when quality reduction alone
//! cannot reach the budget.
//!
//! The entry point is [`shrink::shrink_to_size`]; the `decode` and `encode`
//! modules hold the codec plumbing it is built on.

pub mod decode;
pub mod encode;
pub mod shrink;

pub use decode::{decode_image, DecodeError, DecodedImage, FilterType, SourceFormat};
pub use encode::{EncodeError, OutputFormat};
pub use shrink::{shrink_to_size, ShrinkError, ShrinkOptions, ShrinkResult};
