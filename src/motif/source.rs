//! Decoded source images with a session-unique identity

use crate::io::error::{PatternError, Result, invalid_source};
use image::RgbaImage;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Immutable decoded raster used as the repeating motif
///
/// Every constructed image receives a fresh id, so tiles derived from a
/// replaced image can never be mistaken for tiles of its successor even if
/// the pixels happen to match.
#[derive(Debug, Clone)]
pub struct SourceImage {
    id: u64,
    pixels: RgbaImage,
}

impl SourceImage {
    /// Adopt an in-memory RGBA raster
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(invalid_source(&format!(
                "image has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }

        Ok(Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            pixels,
        })
    }

    /// Load and decode an image file in any supported raster format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a decodable image
    /// - The decoded image has no pixels
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let decoded = image::open(&path_buf).map_err(|e| PatternError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Decode an image held in memory, guessing the format from its header
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable image or the
    /// decoded image has no pixels
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| PatternError::ImageDecode { source: e })?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Identity used to key derived tiles
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read-only pixel access
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
