//! Image loading for inline image embeds.
//!
//! Every image is decoded and re-encoded as an opaque RGB JPEG (quality 80)
//! so the PDF writer only ever embeds `DCTDecode` streams. Transparent
//! pixels are composited onto white.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{RgbImage, codecs::jpeg::JpegEncoder};

use super::PIXELS_TO_MM;

const JPEG_QUALITY: u8 = 80;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported image source: {0}")]
    Unsupported(String),
    #[error("Malformed data URL")]
    MalformedDataUrl,
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A decoded image ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub jpeg: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DecodedImage {
    /// Decodes any supported format and re-encodes it as JPEG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let rgb = RgbImage::from_fn(width, height, |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            image::Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
        });

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&rgb)?;
        Ok(Self {
            jpeg,
            width,
            height,
        })
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a)) / 255) as u8
}

/// Resolves an image source to a decoded image.
pub trait ImageLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, ImageError>;
}

/// Loads `data:` URLs and local files. Relative paths resolve against
/// `base_dir` when one is set. Remote URLs are not fetched.
#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    base_dir: Option<PathBuf>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for SourceLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, ImageError> {
        let source = source.trim();
        if let Some(rest) = source.strip_prefix("data:") {
            return DecodedImage::from_bytes(&decode_data_url(rest)?);
        }
        if source.starts_with("http://") || source.starts_with("https://") {
            return Err(ImageError::Unsupported(source.to_string()));
        }
        let path = self.resolve(source.strip_prefix("file://").unwrap_or(source));
        let bytes = std::fs::read(&path).map_err(|source| ImageError::Io {
            path: path.clone(),
            source,
        })?;
        DecodedImage::from_bytes(&bytes)
    }
}

/// Payload of a data URL (the part after `data:`).
fn decode_data_url(rest: &str) -> Result<Vec<u8>, ImageError> {
    let (meta, data) = rest.split_once(',').ok_or(ImageError::MalformedDataUrl)?;
    if meta.ends_with(";base64") {
        let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(STANDARD.decode(data)?)
    } else {
        Ok(data.as_bytes().to_vec())
    }
}

/// Scales a pixel size to millimetres, then down to fit `max_width`, then
/// down to fit `max_height`, keeping the aspect ratio.
pub fn fit_image(width_px: u32, height_px: u32, max_width: f32, max_height: f32) -> (f32, f32) {
    let mut width = width_px as f32 * PIXELS_TO_MM;
    let mut height = height_px as f32 * PIXELS_TO_MM;
    if width > max_width {
        let ratio = max_width / width;
        width = max_width;
        height *= ratio;
    }
    if height > max_height {
        let ratio = max_height / height;
        height = max_height;
        width *= ratio;
    }
    (width, height)
}
