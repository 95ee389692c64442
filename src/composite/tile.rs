//! Square repeat tiles holding one centered, scaled and rotated motif

use crate::composite::sampling::{MotifTransform, bilinear_sample, composite_over};
use crate::motif::{ColorSpec, SourceImage};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Immutable square raster used as the unit of repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: RgbaImage,
}

impl Tile {
    /// Side length in pixels
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    /// Read-only pixel access
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether every pixel is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.pixels.pixels().all(|pixel| pixel[3] == u8::MAX)
    }
}

/// Geometry and fill for one tile, with the background already resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    /// Side of the tile in pixels, assumed positive and already clamped
    pub tile_size: u32,
    /// Clockwise motif rotation in degrees
    pub rotation_degrees: f64,
    /// Length the motif's longer side is fitted to
    pub motif_pixel_size: f64,
    /// Fill behind the motif, possibly transparent
    pub background: Rgba<u8>,
}

/// Build a tile from user-facing color text
///
/// Invalid color text falls back to the default background.
pub fn build_tile(
    image: Option<&SourceImage>,
    tile_size: u32,
    rotation_degrees: f64,
    motif_pixel_size: f64,
    background: &ColorSpec,
) -> Tile {
    build_tile_with_fill(
        image,
        &TileSpec {
            tile_size,
            rotation_degrees,
            motif_pixel_size,
            background: background.resolve(),
        },
    )
}

/// Build a tile over an explicit fill color
///
/// The motif is fitted so its longer side spans `motif_pixel_size`, resampled
/// with a bicubic filter, then rotated about the tile midpoint with bilinear
/// sampling. Nothing is clipped on purpose: a motif larger than the tile is
/// cut only by the raster bounds and continues in the neighbouring repeat
/// only as far as the painter places copies side by side.
pub fn build_tile_with_fill(image: Option<&SourceImage>, spec: &TileSpec) -> Tile {
    let mut pixels = RgbaImage::from_pixel(spec.tile_size, spec.tile_size, spec.background);

    let Some(source) = image else {
        return Tile { pixels };
    };

    let motif = fit_motif(source, spec.motif_pixel_size);
    let transform = MotifTransform::new(
        spec.tile_size,
        motif.width(),
        motif.height(),
        spec.rotation_degrees,
    );

    let (cols, rows) = transform.footprint(spec.tile_size);
    for y in rows {
        for x in cols.clone() {
            let [mx, my] = transform.to_motif(x, y);
            if let Some(sample) = bilinear_sample(&motif, mx, my) {
                composite_over(pixels.get_pixel_mut(x, y), sample);
            }
        }
    }

    Tile { pixels }
}

/// Scaled dimensions preserving aspect ratio, longer side = `motif_pixel_size`
pub fn fitted_dimensions(width: u32, height: u32, motif_pixel_size: f64) -> (u32, u32) {
    let longest = f64::from(width.max(height).max(1));
    let fit_scale = motif_pixel_size / longest;
    let scaled = |side: u32| (f64::from(side) * fit_scale).round().max(1.0) as u32;
    (scaled(width), scaled(height))
}

fn fit_motif(source: &SourceImage, motif_pixel_size: f64) -> RgbaImage {
    let (width, height) = fitted_dimensions(source.width(), source.height(), motif_pixel_size);

    if (width, height) == (source.width(), source.height()) {
        return source.pixels().clone();
    }

    imageops::resize(source.pixels(), width, height, FilterType::CatmullRom)
}
