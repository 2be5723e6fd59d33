/// Meta Image Service - HTTP Server
///
/// Serves `GET /meta-image`: fetches a page, follows its social preview image
/// tag, and returns a resized, center-cropped JPEG.
use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use meta_image_service::handlers;
use meta_image_service::middleware::MetricsMiddleware;
use meta_image_service::services::{
    build_http_client, Fetcher, MetaImageService, ThumbnailConfig, ThumbnailProcessor,
};
use meta_image_service::Config;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Failed to load configuration: {e}"),
        )
    })?;

    // One pooled client for the lifetime of the process
    let http_client = build_http_client(&config.fetch)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let fetcher = Fetcher::new(http_client, config.fetch.max_body_bytes);

    let processor = Arc::new(ThumbnailProcessor::new(ThumbnailConfig {
        max_dimension: config.thumbnail.max_dimension,
        ..ThumbnailConfig::default()
    }));
    let service = web::Data::new(MetaImageService::new(fetcher, processor));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(
        address = %bind_address,
        env = %config.app.env,
        fetch_timeout_secs = config.fetch.timeout_secs,
        "Meta image service starting HTTP server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(actix_middleware::Logger::default())
            .wrap(MetricsMiddleware)
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    tracing::info!("Meta image service shutting down");
    Ok(())
}
