//! Meta image service - coordinates the full thumbnail workflow
//!
//! 1. Fetch the page
//! 2. Resolve the og:image / twitter:image URL
//! 3. Fetch the image
//! 4. Decode, transform and encode on the blocking pool

use super::fetcher::Fetcher;
use super::resolver;
use super::thumbnail::geometry::ensure_positive;
use super::thumbnail::ThumbnailProcessor;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{PageRequest, Thumbnail};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Stateless per request; cheap to clone, shares the connection pool
#[derive(Clone)]
pub struct MetaImageService {
    fetcher: Fetcher,
    processor: Arc<ThumbnailProcessor>,
}

impl MetaImageService {
    pub fn new(fetcher: Fetcher, processor: Arc<ThumbnailProcessor>) -> Self {
        Self { fetcher, processor }
    }

    pub async fn thumbnail_for(&self, request: &PageRequest) -> Result<Thumbnail> {
        ensure_positive(request.requested_width, request.requested_height)?;

        info!(page_url = %request.page_url, "Requesting page");
        let started = Instant::now();
        let page = self.fetcher.fetch(&request.page_url).await;
        metrics::observe_fetch("page", started.elapsed());
        let page = page?;

        let image_ref = resolver::resolve(&page.text()).ok_or_else(|| AppError::NoImageMetaFound {
            page_url: request.page_url.clone(),
        })?;

        // Relative and protocol-relative references resolve against the final page URL
        let image_url = page
            .url
            .join(&image_ref.uri)
            .map_err(|e| AppError::upstream(image_ref.uri.as_str(), e))?;

        info!(page_url = %request.page_url, image_url = %image_url, "Requesting image");
        let started = Instant::now();
        let image = self.fetcher.fetch(image_url.as_str()).await;
        metrics::observe_fetch("image", started.elapsed());
        let image = image?;

        let thumbnail = self
            .processor
            .clone()
            .generate_async(image.body, request.requested_width, request.requested_height)
            .await?;

        info!(
            image_url = %image_url,
            width = thumbnail.width,
            height = thumbnail.height,
            size = thumbnail.bytes.len(),
            "Thumbnail created"
        );

        Ok(thumbnail)
    }
}
