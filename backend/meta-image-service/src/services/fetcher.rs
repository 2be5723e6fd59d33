//! Upstream fetcher for pages and images
//!
//! Every failure mode (bad URL, connect error, timeout, non-2xx, oversized body)
//! collapses to `AppError::UpstreamUnavailable`. No retries.

use crate::config::FetchConfig;
use crate::error::{AppError, Result};
use bytes::{Bytes, BytesMut};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Successful fetch: final URL after redirects plus the unparsed body
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub url: Url,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchedResource {
    /// Body as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Build the process-wide pooled HTTP client
pub fn build_http_client(cfg: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(cfg.timeout())
        .connect_timeout(cfg.connect_timeout())
        .user_agent(cfg.user_agent.clone())
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))
}

/// Fetches raw bytes over a shared connection pool
#[derive(Clone)]
pub struct Fetcher {
    http_client: Client,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(http_client: Client, max_body_bytes: usize) -> Self {
        Self {
            http_client,
            max_body_bytes,
        }
    }

    pub async fn fetch(&self, uri: &str) -> Result<FetchedResource> {
        let url = Url::parse(uri).map_err(|e| AppError::upstream(uri, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::upstream(
                uri,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::upstream(uri, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(uri, format!("HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes as u64 {
                return Err(AppError::upstream(
                    uri,
                    format!("body of {len} bytes exceeds limit"),
                ));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AppError::upstream(uri, e))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(AppError::upstream(uri, "body exceeds limit"));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(
            url = %final_url,
            status = status.as_u16(),
            size = body.len(),
            "Fetched upstream resource"
        );

        Ok(FetchedResource {
            url: final_url,
            content_type,
            body: body.freeze(),
        })
    }
}
