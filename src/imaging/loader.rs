use std::collections::HashMap;
use std::io::{self, Cursor};

use image::{DynamicImage, ImageFormat, ImageReader};
use log::debug;

use crate::error::{GameError, Result};

/// Source references may carry this prefix to mark a local file
pub const FILE_PREFIX: &str = "file:";

/// A decoded image and the container it was stored in
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

/// Resolves a source reference to a decoded image.
/// Implementations decide what a reference means (path, URL, key).
pub trait ImageLoader: Send + Sync {
    fn load(&self, source: &str) -> Result<LoadedImage>;
}

/// Decode bytes whose format is sniffed from their content
pub fn decode_bytes(bytes: &[u8]) -> Result<LoadedImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let Some(format) = reader.format() else {
        return Err(GameError::Format { found: "unknown".into() });
    };
    let image = reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => GameError::Format {
            found: format!("{format:?}").to_lowercase(),
        },
        other => GameError::Decode(other),
    })?;
    debug!("decoded {}x{} {format:?} image", image.width(), image.height());
    Ok(LoadedImage { image, format })
}

/// Reads images from the local filesystem.
/// Accepts plain paths and `file:` references.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl ImageLoader for FileLoader {
    fn load(&self, source: &str) -> Result<LoadedImage> {
        let path = source.strip_prefix(FILE_PREFIX).unwrap_or(source);
        if path.starts_with("http://") || path.starts_with("https://") {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("network source '{path}' needs a network loader"),
            )));
        }
        let bytes = std::fs::read(path)?;
        decode_bytes(&bytes)
    }
}

/// Serves images from encoded bytes kept in memory, keyed by reference
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(source.into(), bytes);
    }

    pub fn with(mut self, source: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(source, bytes);
        self
    }
}

impl ImageLoader for MemoryLoader {
    fn load(&self, source: &str) -> Result<LoadedImage> {
        let bytes = self.images.get(source).ok_or_else(|| {
            GameError::Io(io::Error::new(io::ErrorKind::NotFound, format!("no image '{source}'")))
        })?;
        decode_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_png_is_recognized() {
        let bytes = encode(DynamicImage::ImageRgb8(RgbImage::new(3, 2)), ImageFormat::Png);
        let loaded = MemoryLoader::new().with("a", bytes).load("a").unwrap();
        assert_eq!(loaded.format, ImageFormat::Png);
        assert_eq!((loaded.image.width(), loaded.image.height()), (3, 2));
    }

    #[test]
    fn test_gif_reports_its_format() {
        let bytes = encode(DynamicImage::ImageRgba8(RgbaImage::new(2, 2)), ImageFormat::Gif);
        let loaded = decode_bytes(&bytes).unwrap();
        assert_eq!(loaded.format, ImageFormat::Gif);
    }

    #[test]
    fn test_garbage_is_a_format_error() {
        let result = decode_bytes(b"definitely not an image");
        assert!(matches!(result, Err(GameError::Format { .. })));
    }

    #[test]
    fn test_missing_sources_are_io_errors() {
        assert!(matches!(MemoryLoader::new().load("nope"), Err(GameError::Io(_))));
        assert!(matches!(FileLoader.load("file:/no/such/dir/x.png"), Err(GameError::Io(_))));
        assert!(matches!(FileLoader.load("https://example.com/x.png"), Err(GameError::Io(_))));
    }
}
