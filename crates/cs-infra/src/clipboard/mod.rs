mod thumbnail_generator;

pub use thumbnail_generator::{InfraThumbnailGenerator, DEFAULT_THUMBNAIL_MAX_EDGE};
