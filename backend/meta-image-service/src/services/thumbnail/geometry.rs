//! Thumbnail geometry
//!
//! Pure size arithmetic for the two-stage transform:
//! 1. fit: largest uniform scale that keeps the source inside the target box
//! 2. cover: rescale the fitted image until it covers the box, then cut the
//!    centered excess

use crate::error::{AppError, Result};
use crate::models::TargetSize;

/// Divisor applied to source dimensions when a size is not requested
pub const DEFAULT_SIZE_DIVISOR: u32 = 10;

/// Centered window of the fitted image that, once scaled, exactly covers the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolve the output size from the requested values and the source dimensions.
///
/// Missing values default to `source / 10`. Anything below 1 or above
/// `max_dimension` is rejected.
pub fn resolve_target_size(
    requested_width: Option<i64>,
    requested_height: Option<i64>,
    source: (u32, u32),
    max_dimension: u32,
) -> Result<TargetSize> {
    let width = requested_width.unwrap_or(i64::from(source.0 / DEFAULT_SIZE_DIVISOR));
    let height = requested_height.unwrap_or(i64::from(source.1 / DEFAULT_SIZE_DIVISOR));

    let max = i64::from(max_dimension);
    if width < 1 || height < 1 || width > max || height > max {
        return Err(AppError::InvalidTargetSize { width, height });
    }

    Ok(TargetSize {
        width: width as u32,
        height: height as u32,
    })
}

/// Validate a size before any pixel work happens.
pub fn ensure_positive(requested_width: Option<i64>, requested_height: Option<i64>) -> Result<()> {
    match (requested_width, requested_height) {
        (Some(w), _) if w <= 0 => Err(AppError::InvalidTargetSize {
            width: w,
            height: requested_height.unwrap_or_default(),
        }),
        (_, Some(h)) if h <= 0 => Err(AppError::InvalidTargetSize {
            width: requested_width.unwrap_or_default(),
            height: h,
        }),
        _ => Ok(()),
    }
}

/// Stage 1: uniform scale so the source fits entirely inside `target`.
pub fn fit_within(source: (u32, u32), target: TargetSize) -> (u32, u32) {
    let (src_w, src_h) = (f64::from(source.0), f64::from(source.1));
    let scale = (f64::from(target.width) / src_w).min(f64::from(target.height) / src_h);

    let w = scaled(src_w, scale).min(target.width);
    let h = scaled(src_h, scale).min(target.height);
    (w, h)
}

/// Stage 2: uniform scale so `source` covers `target`, expressed as the centered
/// window of `source` that maps onto the target box.
///
/// Cutting the window before scaling keeps memory bounded for extreme aspect
/// ratios; scaling the window to `target` gives the cover-and-crop result.
pub fn cover_crop(source: (u32, u32), target: TargetSize) -> CropPlan {
    let (src_w, src_h) = (f64::from(source.0), f64::from(source.1));
    let scale = (f64::from(target.width) / src_w).max(f64::from(target.height) / src_h);

    let width = scaled(f64::from(target.width), 1.0 / scale).min(source.0);
    let height = scaled(f64::from(target.height), 1.0 / scale).min(source.1);

    CropPlan {
        x: (source.0 - width) / 2,
        y: (source.1 - height) / 2,
        width,
        height,
    }
}

fn scaled(length: f64, scale: f64) -> u32 {
    ((length * scale).round() as u32).max(1)
}
