/// HTTP handlers for meta-image-service
///
/// This module contains handlers for:
/// - Meta image: resolve a page's preview image and serve it as a thumbnail
/// - Health: liveness and readiness probes
pub mod meta_image;

pub use meta_image::get_meta_image;

use actix_web::{web, HttpResponse};

/// Route table shared by the server and the integration tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/meta-image", web::get().to(get_meta_image))
        .route(
            "/api/v1/health",
            web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
        )
        .route(
            "/api/v1/health/ready",
            web::get().to(|| async { HttpResponse::Ok().finish() }),
        )
        .route(
            "/api/v1/health/live",
            web::get().to(|| async { HttpResponse::Ok().finish() }),
        )
        .route("/metrics", web::get().to(crate::metrics::metrics_handler));
}
