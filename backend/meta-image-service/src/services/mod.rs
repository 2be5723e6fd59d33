/// Business logic layer for meta-image-service
pub mod fetcher;
pub mod meta_image;
pub mod resolver;
pub mod thumbnail;

pub use fetcher::{build_http_client, FetchedResource, Fetcher};
pub use meta_image::MetaImageService;
pub use thumbnail::{ThumbnailConfig, ThumbnailProcessor};
