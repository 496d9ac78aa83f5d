use anyhow::{Context, Result};
use image::{imageops::FilterType, ColorType, GenericImageView};

use cs_core::ports::{GeneratedThumbnail, ThumbnailGeneratorPort};

/// Longest edge of generated thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_MAX_EDGE: u32 = 200;

/// Decodes any raster format `image` understands and re-encodes as lossless WebP.
pub struct InfraThumbnailGenerator {
    max_edge: u32,
}

impl InfraThumbnailGenerator {
    pub fn new(max_edge: u32) -> Self {
        Self { max_edge }
    }
}

impl Default for InfraThumbnailGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_MAX_EDGE)
    }
}

impl ThumbnailGeneratorPort for InfraThumbnailGenerator {
    fn generate_thumbnail(&self, image_bytes: &[u8]) -> Result<GeneratedThumbnail> {
        let decoded =
            image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;
        let (original_width, original_height) = decoded.dimensions();
        let (target_width, target_height) =
            calculate_target_size(original_width, original_height, self.max_edge);

        let resized = if target_width == original_width && target_height == original_height {
            decoded
        } else {
            decoded.resize_exact(target_width, target_height, FilterType::Triangle)
        };

        let rgba = resized.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut thumbnail_bytes = Vec::new();
        image::codecs::webp::WebPEncoder::new_lossless(&mut thumbnail_bytes)
            .encode(rgba.as_raw(), width, height, ColorType::Rgba8.into())
            .context("encode thumbnail to webp")?;

        Ok(GeneratedThumbnail {
            thumbnail_bytes,
            original_width,
            original_height,
        })
    }
}

/// Scale so the longest edge fits `max_edge`, keeping aspect ratio. Never upscales.
fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled = ((height as f64) * (max_edge as f64) / (width as f64)).round() as u32;
        (max_edge, scaled.max(1))
    } else {
        let scaled = ((width as f64) * (max_edge as f64) / (height as f64)).round() as u32;
        (scaled.max(1), max_edge)
    }
}
