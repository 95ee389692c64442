//! Owning layer tying the loaded image, parameters, cache and surfaces together

use crate::composite::cache::{CacheStats, TileCache, TileKey};
use crate::composite::tile::{Tile, TileSpec, build_tile_with_fill};
use crate::io::error::Result;
use crate::io::export::{ExportSpec, ExportedImage, render_export};
use crate::io::preview::PreviewSurface;
use crate::motif::{MotifParameters, SourceImage};
use std::path::Path;

/// Non-fatal message meant for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text to show
    pub message: String,
}

/// One user's editing state
///
/// Owns the source image for as long as it stays loaded. Replacing or
/// clearing it drops every cached tile derived from it.
#[derive(Default)]
pub struct Session {
    image: Option<SourceImage>,
    parameters: MotifParameters,
    cache: TileCache,
    notices: Vec<Notice>,
}

impl Session {
    /// Create a session with no image and default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given parameters, clamped into range
    pub fn with_parameters(parameters: &MotifParameters) -> Self {
        Self {
            parameters: parameters.sanitized(),
            ..Self::default()
        }
    }

    /// Load an image file, replacing the current one
    ///
    /// On failure the session reverts to having no image and records a
    /// notice; the error is returned for the caller to report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.replace_image(SourceImage::open(path))
    }

    /// Decode an in-memory image, replacing the current one
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.replace_image(SourceImage::decode(bytes))
    }

    /// Adopt an already decoded image, replacing the current one
    pub fn set_image(&mut self, image: SourceImage) {
        self.clear_image();
        self.image = Some(image);
    }

    fn replace_image(&mut self, loaded: Result<SourceImage>) -> Result<()> {
        match loaded {
            Ok(image) => {
                log::debug!(
                    "loaded {}x{} image #{}",
                    image.width(),
                    image.height(),
                    image.id()
                );
                self.set_image(image);
                Ok(())
            }
            Err(error) => {
                log::warn!("image load failed: {error}");
                self.clear_image();
                self.notices.push(Notice {
                    message: format!("Could not load image: {error}"),
                });
                Err(error)
            }
        }
    }

    /// Drop the current image and its derived tiles
    pub fn clear_image(&mut self) {
        if let Some(old) = self.image.take() {
            self.cache.invalidate_image(old.id());
        }
    }

    /// Currently loaded image
    pub const fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Current parameters
    pub const fn parameters(&self) -> &MotifParameters {
        &self.parameters
    }

    /// Replace the parameters, clamping them into range
    pub fn set_parameters(&mut self, parameters: &MotifParameters) {
        self.parameters = parameters.sanitized();
    }

    /// Tile geometry for the current parameters
    pub fn tile_spec(&self) -> TileSpec {
        TileSpec {
            tile_size: self.parameters.tile_size(),
            rotation_degrees: self.parameters.rotation_degrees,
            motif_pixel_size: self.parameters.motif_pixel_size(),
            background: self.parameters.background.resolve(),
        }
    }

    /// Value key of the current preview tile
    pub fn tile_key(&self) -> TileKey {
        TileKey::new(self.image.as_ref().map(SourceImage::id), &self.tile_spec())
    }

    /// Preview tile for the current state, built once per distinct key
    pub fn current_tile(&mut self) -> &Tile {
        let spec = self.tile_spec();
        let key = TileKey::new(self.image.as_ref().map(SourceImage::id), &spec);
        let image = self.image.as_ref();
        self.cache
            .get_or_build(key, || build_tile_with_fill(image, &spec))
    }

    /// Repaint `surface` if the tile or the surface changed since last time
    ///
    /// Returns whether anything was drawn.
    pub fn render_preview(&mut self, surface: &mut PreviewSurface) -> bool {
        let key = self.tile_key();
        if surface.is_current(&key) {
            return false;
        }

        let background = self.parameters.background.resolve();
        let tile = self.current_tile();
        surface.redraw(key, tile, background)
    }

    /// Render an export of the current pattern
    ///
    /// Returns `None` when no image is loaded.
    pub fn export(&self, spec: &ExportSpec) -> Option<ExportedImage> {
        render_export(self.image.as_ref(), &self.parameters, spec)
    }

    /// Notices recorded so far
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return the recorded notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Tile cache statistics
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }
}
