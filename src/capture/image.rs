//! Decoding, normalization, and PNG persistence of capture screenshots.
//!
//! Browser extensions upload the screenshot as a base64 string whose decoded
//! bytes may be any common image container. Everything is normalized to a
//! 3-channel RGB buffer on decode; alpha, palette, and grayscale source data
//! are flattened in the process, and that normalization is irreversible.
//! Re-encoding always targets PNG, independent of the upload's source format.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, RgbImage};
use thiserror::Error;

use super::geometry::Bounds;

/// A screenshot that failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unrecognized or corrupt image data: {0}")]
    Image(#[from] image::ImageError),
}

/// A decoded capture screenshot, normalized to RGB8.
///
/// Construction either fully succeeds or fails with a [`DecodeError`];
/// a partially decoded image is never returned.
#[derive(Clone, PartialEq)]
pub struct CaptureImage {
    pixels: RgbImage,
}

impl CaptureImage {
    /// Decodes a base64-encoded image string.
    ///
    /// # Errors
    /// Returns [`DecodeError::Base64`] if the string is not valid base64, or
    /// [`DecodeError::Image`] if the decoded bytes are not a recognizable
    /// image container.
    pub fn from_base64(encoded: &str) -> Result<Self, DecodeError> {
        let bytes = BASE64.decode(encoded.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Decodes raw image container bytes (PNG, JPEG).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self {
            pixels: decoded.to_rgb8(),
        })
    }

    /// Encodes the image as base64 over a PNG container.
    pub fn to_base64(&self) -> Result<String, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.pixels.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(BASE64.encode(buffer.into_inner()))
    }

    /// Writes the image to disk as PNG, regardless of the path's extension.
    ///
    /// # Errors
    /// Returns an error if the destination is unwritable.
    pub fn save(&self, path: &Path) -> Result<(), image::ImageError> {
        self.pixels.save_with_format(path, ImageFormat::Png)
    }

    /// Returns the image dimensions, the validation context for bbox trees.
    #[inline]
    pub fn size(&self) -> Bounds {
        Bounds::new(self.pixels.width(), self.pixels.height())
    }

    /// Returns the normalized RGB pixel buffer.
    #[inline]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

impl fmt::Debug for CaptureImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaptureImage({})", self.size())
    }
}
