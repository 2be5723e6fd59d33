//! Prometheus metrics for meta-image-service

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::time::Duration;

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "path", "status"]
    )
    .expect("register http_requests_total")
});

pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latency",
        &["method", "path", "status"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register http_request_duration_seconds")
});

/// Thumbnail requests by outcome (`ok` or an error kind)
pub static META_IMAGE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "meta_image_requests_total",
        "Meta image requests by outcome",
        &["outcome"]
    )
    .expect("register meta_image_requests_total")
});

/// Upstream fetch latency, `target` is `page` or `image`
pub static UPSTREAM_FETCH_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "meta_image_upstream_fetch_seconds",
        "Upstream fetch latency",
        &["target"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("register meta_image_upstream_fetch_seconds")
});

pub fn record_outcome(outcome: &str) {
    META_IMAGE_REQUESTS_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

pub fn observe_fetch(target: &str, elapsed: Duration) {
    UPSTREAM_FETCH_SECONDS
        .with_label_values(&[target])
        .observe(elapsed.as_secs_f64());
}

/// `GET /metrics`
pub async fn metrics_handler() -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_counter_increments() {
        let before = META_IMAGE_REQUESTS_TOTAL
            .with_label_values(&["metrics_test"])
            .get();
        record_outcome("metrics_test");
        record_outcome("metrics_test");
        let after = META_IMAGE_REQUESTS_TOTAL
            .with_label_values(&["metrics_test"])
            .get();
        assert_eq!(after - before, 2);
    }

    #[actix_web::test]
    async fn test_metrics_exposition() {
        observe_fetch("page", Duration::from_millis(12));
        let response = metrics_handler().await;
        assert!(response.status().is_success());
    }
}
