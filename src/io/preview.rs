//! Live preview surface that repaints only when its inputs change

use crate::composite::cache::TileKey;
use crate::composite::painter::{Offset, paint_pattern};
use crate::composite::tile::Tile;
use crate::io::error::{PatternError, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// On-screen stand-in: a resizable raster showing the tiled pattern
///
/// Remembers the key of the tile it last painted so repeated redraws with
/// unchanged inputs are skipped. Resizing or moving the anchor forces the
/// next redraw.
#[derive(Debug, Clone)]
pub struct PreviewSurface {
    frame: RgbaImage,
    offset: Offset,
    last_drawn: Option<TileKey>,
}

impl PreviewSurface {
    /// Create a blank surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::new(width, height),
            offset: Offset::default(),
            last_drawn: None,
        }
    }

    /// Follow the container's new size, discarding the current frame
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.frame.dimensions() != (width, height) {
            self.frame = RgbaImage::new(width, height);
            self.last_drawn = None;
        }
    }

    /// Move the grid anchor
    pub fn set_offset(&mut self, offset: Offset) {
        if self.offset != offset {
            self.offset = offset;
            self.last_drawn = None;
        }
    }

    /// Current grid anchor
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Most recently painted frame
    pub const fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Whether the frame already shows the tile identified by `key`
    pub fn is_current(&self, key: &TileKey) -> bool {
        self.last_drawn.as_ref() == Some(key)
    }

    /// Fill with `background` and paint `tile`, unless the frame is current
    ///
    /// Returns whether anything was drawn.
    pub fn redraw(&mut self, key: TileKey, tile: &Tile, background: Rgba<u8>) -> bool {
        if self.is_current(&key) {
            log::debug!("preview unchanged, skipping redraw");
            return false;
        }

        for pixel in self.frame.pixels_mut() {
            *pixel = background;
        }
        paint_pattern(&mut self.frame, tile, self.offset);
        self.last_drawn = Some(key);
        true
    }

    /// Write the current frame as a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// image cannot be saved
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PatternError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        self.frame
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| PatternError::ImageEncode {
                format: "PNG",
                source: e,
            })
    }
}
