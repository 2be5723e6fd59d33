//! Thumbnail generation
//!
//! - Geometry for the fit and cover/crop stages
//! - Processor for decoding and resizing
//! - Encoder for JPEG output and cache lifetime

pub mod encoder;
pub mod geometry;
pub mod processor;

pub use encoder::{ThumbnailEncoder, CACHE_MAX_AGE_SECONDS, JPEG_QUALITY};
pub use processor::{ThumbnailConfig, ThumbnailProcessor};
