use anyhow::Result;

/// Generated thumbnail payload and metadata.
pub struct GeneratedThumbnail {
    /// Encoded thumbnail bytes.
    pub thumbnail_bytes: Vec<u8>,
    /// Original image width in pixels.
    pub original_width: u32,
    /// Original image height in pixels.
    pub original_height: u32,
}

/// Generator port for creating thumbnails from raster bytes.
pub trait ThumbnailGeneratorPort: Send + Sync {
    /// Decode `image_bytes`, downscale and re-encode. Errors mean "not decodable".
    fn generate_thumbnail(&self, image_bytes: &[u8]) -> Result<GeneratedThumbnail>;
}
