//! Pattern constants and runtime configuration defaults

// Parameter-to-pixel mapping
/// Nominal pixel size that scale and spacing are expressed against
pub const REFERENCE_SIZE: f64 = 1600.0;
/// Largest motif footprint as a multiple of the nominal tile size
pub const MOTIF_OVERSIZE_RATIO: f64 = 1.2;

/// Smallest preview tile side in pixels
pub const MIN_TILE_SIZE: u32 = 40;
/// Largest preview tile side in pixels
pub const MAX_TILE_SIZE: u32 = 2048;

/// Smallest motif footprint in pixels
pub const MIN_MOTIF_PIXEL_SIZE: f64 = 40.0;
/// Largest motif footprint in pixels
pub const MAX_MOTIF_PIXEL_SIZE: f64 = REFERENCE_SIZE * MOTIF_OVERSIZE_RATIO;

// Accepted knob ranges, values outside are clamped rather than rejected
/// Smallest accepted motif scale
pub const MIN_SCALE: f64 = 0.01;
/// Largest accepted motif scale
pub const MAX_SCALE: f64 = 10.0;
/// Smallest accepted spacing factor
pub const MIN_SPACING: f64 = 0.1;
/// Largest accepted spacing factor
pub const MAX_SPACING: f64 = 40.0;

// Default values for configurable parameters
/// Default motif scale
pub const DEFAULT_SCALE: f64 = 0.35;
/// Default spacing factor
pub const DEFAULT_SPACING: f64 = 1.1;
/// Default rotation in degrees
pub const DEFAULT_ROTATION: f64 = 0.0;
/// Background used when a color string cannot be parsed
pub const DEFAULT_BACKGROUND: [u8; 4] = [0x1a, 0x1a, 0x1a, 0xff];
/// Hex text of the fallback background
pub const DEFAULT_BACKGROUND_HEX: &str = "#1a1a1a";

// Export settings
/// Smallest export side in pixels
pub const MIN_EXPORT_SIZE: u32 = 64;
/// Largest export side in pixels
pub const MAX_EXPORT_SIZE: u32 = 8192;
/// Default export side in pixels
pub const DEFAULT_EXPORT_SIZE: u32 = 1024;
/// Largest number of tile repeats per export edge
pub const MAX_EXPORT_REPEATS: u32 = 16;
/// Encoder quality for JPEG exports
pub const JPEG_QUALITY: u8 = 92;
/// Prefix of exported file names
pub const EXPORT_FILE_PREFIX: &str = "pattern-tile";

// Safety limit to keep memoized tiles bounded
/// Number of tiles kept by the tile cache
pub const MAX_CACHED_TILES: usize = 8;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
