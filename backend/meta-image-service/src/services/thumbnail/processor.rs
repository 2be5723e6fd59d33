//! Thumbnail processor - turns fetched image bytes into an exact-size JPEG
//!
//! Decodes to RGBA8, fits the image inside the target box, covers the box and
//! crops the centered excess, then hands off to the JPEG encoder.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use super::encoder::ThumbnailEncoder;
use super::geometry::{cover_crop, fit_within, resolve_target_size};
use crate::error::{AppError, Result};
use crate::models::{TargetSize, Thumbnail};
use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::sync::Arc;
use tracing::debug;

/// Configuration for thumbnail generation
#[derive(Clone, Debug)]
pub struct ThumbnailConfig {
    /// Largest accepted width or height in pixels
    pub max_dimension: u32,
    /// Resampling filter for both resize stages
    pub filter: FilterType,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_dimension: 4096,
            filter: FilterType::Triangle,
        }
    }
}

/// Thumbnail processor
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
    encoder: ThumbnailEncoder,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: ThumbnailConfig) -> Self {
        Self {
            config,
            encoder: ThumbnailEncoder::default(),
        }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    /// Decode fetched bytes into the fixed RGBA8 representation
    pub fn decode(&self, data: &[u8]) -> Result<RgbaImage> {
        let image = image::load_from_memory(data)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(AppError::DecodeFailure("image has no pixels".to_string()));
        }

        debug!(
            original_width = image.width(),
            original_height = image.height(),
            "Decoded source image"
        );
        Ok(image)
    }

    /// Resize and center-crop `image` to exactly the resolved target size.
    ///
    /// Missing dimensions default to a tenth of the source; non-positive or
    /// oversized ones are rejected before any pixel is touched.
    pub fn transform(
        &self,
        image: &RgbaImage,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<RgbaImage> {
        let target = resolve_target_size(
            width,
            height,
            image.dimensions(),
            self.config.max_dimension,
        )?;

        let fitted = self.fit(image, target);
        Ok(self.cover(&fitted, target))
    }

    /// Decode, transform and encode (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `generate_async` instead.
    pub fn generate(
        &self,
        original_data: &[u8],
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<Thumbnail> {
        let image = self.decode(original_data)?;
        let thumbnail = self.transform(&image, width, height)?;
        let encoded = self.encoder.encode(&thumbnail)?;

        debug!(
            width = encoded.width,
            height = encoded.height,
            size = encoded.bytes.len(),
            "Thumbnail generated"
        );

        Ok(encoded)
    }

    /// Generate a thumbnail asynchronously using a blocking thread pool
    pub async fn generate_async(
        self: Arc<Self>,
        original_data: Bytes,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<Thumbnail> {
        tokio::task::spawn_blocking(move || self.generate(&original_data, width, height))
            .await
            .map_err(|e| AppError::Internal(format!("Thumbnail task panicked: {e}")))?
    }

    fn fit(&self, image: &RgbaImage, target: TargetSize) -> RgbaImage {
        let (w, h) = fit_within(image.dimensions(), target);
        self.resize(image, w, h)
    }

    fn cover(&self, fitted: &RgbaImage, target: TargetSize) -> RgbaImage {
        let plan = cover_crop(fitted.dimensions(), target);
        let window = imageops::crop_imm(fitted, plan.x, plan.y, plan.width, plan.height).to_image();
        self.resize(&window, target.width, target.height)
    }

    fn resize(&self, image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        imageops::resize(image, width, height, self.config.filter)
    }
}
