//! Motif knobs and their mapping to tile and motif pixel sizes

use crate::io::configuration::{
    DEFAULT_ROTATION, DEFAULT_SCALE, DEFAULT_SPACING, MAX_MOTIF_PIXEL_SIZE, MAX_SCALE,
    MAX_SPACING, MAX_TILE_SIZE, MIN_MOTIF_PIXEL_SIZE, MIN_SCALE, MIN_SPACING, MIN_TILE_SIZE,
    REFERENCE_SIZE,
};
use crate::motif::color::ColorSpec;

/// User-facing description of how the motif repeats
///
/// `scale` and `spacing_factor` are independent: spacing sets the tile
/// footprint (larger spacing gives a smaller tile, so more repeats), scale
/// sets the motif footprint inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifParameters {
    /// Motif footprint relative to [`REFERENCE_SIZE`]
    pub scale: f64,
    /// Inverse tile footprint relative to [`REFERENCE_SIZE`]
    pub spacing_factor: f64,
    /// Clockwise rotation of the motif in degrees
    pub rotation_degrees: f64,
    /// Fill behind the motif
    pub background: ColorSpec,
}

impl Default for MotifParameters {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            spacing_factor: DEFAULT_SPACING,
            rotation_degrees: DEFAULT_ROTATION,
            background: ColorSpec::default(),
        }
    }
}

impl MotifParameters {
    /// Create parameters, clamping every knob into its accepted range
    pub fn new(
        scale: f64,
        spacing_factor: f64,
        rotation_degrees: f64,
        background: ColorSpec,
    ) -> Self {
        Self {
            scale,
            spacing_factor,
            rotation_degrees,
            background,
        }
        .sanitized()
    }

    /// Copy with out-of-range values clamped to the nearest valid bound
    ///
    /// Non-finite values fall back to the defaults and rotation is
    /// normalized into `[0, 360)`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            scale: clamp_finite(self.scale, MIN_SCALE, MAX_SCALE, DEFAULT_SCALE),
            spacing_factor: clamp_finite(
                self.spacing_factor,
                MIN_SPACING,
                MAX_SPACING,
                DEFAULT_SPACING,
            ),
            rotation_degrees: normalize_degrees(self.rotation_degrees),
            background: self.background.clone(),
        }
    }

    /// Side of the repeat tile in pixels
    pub fn tile_size(&self) -> u32 {
        tile_size_for_spacing(self.spacing_factor)
    }

    /// Length of the motif's longer side in pixels
    pub fn motif_pixel_size(&self) -> f64 {
        motif_pixel_size_for_scale(self.scale)
    }
}

/// `round(REFERENCE_SIZE / spacing)` clamped to the preview tile range
pub fn tile_size_for_spacing(spacing_factor: f64) -> u32 {
    let spacing = clamp_finite(spacing_factor, MIN_SPACING, MAX_SPACING, DEFAULT_SPACING);
    let raw = (REFERENCE_SIZE / spacing).round();
    raw.clamp(f64::from(MIN_TILE_SIZE), f64::from(MAX_TILE_SIZE)) as u32
}

/// `REFERENCE_SIZE * scale` clamped to the motif footprint range
pub fn motif_pixel_size_for_scale(scale: f64) -> f64 {
    let scale = clamp_finite(scale, MIN_SCALE, MAX_SCALE, DEFAULT_SCALE);
    (REFERENCE_SIZE * scale).clamp(MIN_MOTIF_PIXEL_SIZE, MAX_MOTIF_PIXEL_SIZE)
}

/// Wrap an angle into `[0, 360)`, treating non-finite input as zero
pub fn normalize_degrees(degrees: f64) -> f64 {
    if degrees.is_finite() {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs,
        // and negative zero must not produce a distinct cache key
        if wrapped >= 360.0 || wrapped <= 0.0 {
            0.0
        } else {
            wrapped
        }
    } else {
        DEFAULT_ROTATION
    }
}

fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
