//! JPEG encoding for finished thumbnails

use crate::error::{AppError, Result};
use crate::models::Thumbnail;
use bytes::Bytes;
use image::buffer::ConvertBuffer;
use image::{DynamicImage, ImageOutputFormat, RgbImage, RgbaImage};
use std::io::Cursor;

pub const JPEG_QUALITY: u8 = 60;
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
/// One day
pub const CACHE_MAX_AGE_SECONDS: u32 = 86_400;

#[derive(Debug, Clone)]
pub struct ThumbnailEncoder {
    quality: u8,
}

impl Default for ThumbnailEncoder {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl ThumbnailEncoder {
    /// Encode as JPEG; the alpha channel is discarded
    pub fn encode(&self, image: &RgbaImage) -> Result<Thumbnail> {
        let rgb: RgbImage = image.convert();

        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut cursor, ImageOutputFormat::Jpeg(self.quality))
            .map_err(|e| AppError::EncodeFailure(e.to_string()))?;

        Ok(Thumbnail {
            bytes: Bytes::from(buf),
            mime_type: JPEG_MIME_TYPE,
            cache_max_age_seconds: CACHE_MAX_AGE_SECONDS,
            width: image.width(),
            height: image.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(64, 32, |x, y| Rgba([(x * 4) as u8, (y * 8) as u8, 128, 200]))
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = ThumbnailEncoder::default();
        let image = gradient();

        let first = encoder.encode(&image).unwrap();
        let second = encoder.encode(&image).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_encode_metadata() {
        let thumb = ThumbnailEncoder::default().encode(&gradient()).unwrap();
        assert_eq!(thumb.mime_type, "image/jpeg");
        assert_eq!(thumb.cache_max_age_seconds, 86_400);
        assert_eq!((thumb.width, thumb.height), (64, 32));
        // SOI marker
        assert_eq!(&thumb.bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&thumb.bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_alpha_dropped_colour_kept() {
        // Half-transparent red must come out as plain red, not blended
        let source = RgbaImage::from_pixel(16, 16, Rgba([220, 20, 20, 64]));
        let thumb = ThumbnailEncoder::default().encode(&source).unwrap();

        let decoded = image::load_from_memory(&thumb.bytes).unwrap().to_rgb8();
        let px = decoded.get_pixel(8, 8);
        assert!(px[0] > 180 && px[1] < 60 && px[2] < 60, "{px:?}");
    }
}
