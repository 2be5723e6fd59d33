/// Data models for meta-image-service
use bytes::Bytes;
use url::form_urlencoded;

use crate::error::{AppError, Result};

/// Raw `/meta-image` query values, first occurrence of each key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaImageQuery {
    pub u: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
}

impl MetaImageQuery {
    pub fn parse(query_string: &str) -> Self {
        let mut query = MetaImageQuery::default();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            let slot = match key.as_ref() {
                "u" => &mut query.u,
                "w" => &mut query.w,
                "h" => &mut query.h,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// One thumbnail request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_url: String,
    /// `None` when `w` was absent or not an integer
    pub requested_width: Option<i64>,
    pub requested_height: Option<i64>,
}

impl TryFrom<MetaImageQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: MetaImageQuery) -> Result<Self> {
        let page_url = query
            .u
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(AppError::MissingParameter)?;

        Ok(PageRequest {
            page_url,
            requested_width: parse_dimension(query.w.as_deref()),
            requested_height: parse_dimension(query.h.as_deref()),
        })
    }
}

fn parse_dimension(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Preview image location found in a page's meta tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImageRef {
    pub uri: String,
}

/// Exact output dimensions of a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

/// Encoded thumbnail ready to be served
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Bytes,
    pub mime_type: &'static str,
    pub cache_max_age_seconds: u32,
    pub width: u32,
    pub height: u32,
}
