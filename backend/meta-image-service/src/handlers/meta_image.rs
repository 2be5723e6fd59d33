/// Meta image handler - HTTP endpoint for social preview thumbnails
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::error::Result;
use crate::metrics;
use crate::models::{MetaImageQuery, PageRequest};
use crate::services::MetaImageService;

/// `GET /meta-image?u=<page-url>&w=<width>&h=<height>`
///
/// Any failure is an empty 404; the cause is only logged.
pub async fn get_meta_image(
    req: HttpRequest,
    service: web::Data<MetaImageService>,
) -> Result<HttpResponse> {
    let query = MetaImageQuery::parse(req.query_string());
    let page_url = query.u.clone().unwrap_or_default();

    let result = match PageRequest::try_from(query) {
        Ok(request) => service.thumbnail_for(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(thumbnail) => {
            metrics::record_outcome("ok");
            Ok(HttpResponse::Ok()
                .content_type(thumbnail.mime_type)
                .insert_header(CacheControl(vec![
                    CacheDirective::MaxAge(thumbnail.cache_max_age_seconds),
                    CacheDirective::Public,
                ]))
                .body(thumbnail.bytes))
        }
        Err(e) => {
            metrics::record_outcome(e.kind());
            warn!(kind = e.kind(), page_url = %page_url, error = %e, "Meta image request failed");
            Err(e)
        }
    }
}
