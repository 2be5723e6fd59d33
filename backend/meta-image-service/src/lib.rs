//! Meta Image Service
//!
//! Resolves a web page's og:image / twitter:image and serves it as a
//! center-cropped JPEG thumbnail.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
