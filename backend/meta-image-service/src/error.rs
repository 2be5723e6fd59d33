/// Error types for Meta Image Service
///
/// Every failure along the thumbnail pipeline is represented here. Callers only
/// ever see an empty `404 Not Found`; the variant and its detail go to the log.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for meta-image-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Required `u` query parameter absent or blank
    #[error("Missing required query parameter 'u'")]
    MissingParameter,

    /// Page or image fetch failed, timed out, or returned a non-2xx status
    #[error("Upstream unavailable for '{url}': {reason}")]
    UpstreamUnavailable { url: String, reason: String },

    /// Page parsed but carried no usable og:image / twitter:image tag
    #[error("No image meta tag found on '{page_url}'")]
    NoImageMetaFound { page_url: String },

    /// Fetched bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    /// Resolved thumbnail dimensions are out of range
    #[error("Invalid target size {width}x{height}")]
    InvalidTargetSize { width: i64, height: i64 },

    /// JPEG encoding failed
    #[error("Failed to encode JPEG: {0}")]
    EncodeFailure(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingParameter => "missing_parameter",
            AppError::UpstreamUnavailable { .. } => "upstream_unavailable",
            AppError::NoImageMetaFound { .. } => "no_image_meta_found",
            AppError::DecodeFailure(_) => "decode_failure",
            AppError::InvalidTargetSize { .. } => "invalid_target_size",
            AppError::EncodeFailure(_) => "encode_failure",
            AppError::Internal(_) => "internal",
        }
    }

    pub(crate) fn upstream(url: impl Into<String>, reason: impl ToString) -> Self {
        AppError::UpstreamUnavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::DecodeFailure(err.to_string())
    }
}
