//! Full-resolution export of the tiled pattern to PNG, JPEG or WEBP

use crate::composite::painter::{Offset, paint_pattern};
use crate::composite::tile::{TileSpec, build_tile_with_fill};
use crate::io::configuration::{
    DEFAULT_EXPORT_SIZE, EXPORT_FILE_PREFIX, JPEG_QUALITY, MAX_EXPORT_REPEATS, MAX_EXPORT_SIZE,
    MIN_EXPORT_SIZE,
};
use crate::io::error::{PatternError, Result};
use crate::motif::{ColorSpec, MotifParameters, SourceImage};
use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Encoded file format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    /// Lossless with alpha
    Png,
    /// Lossy and always opaque
    Jpeg,
    /// Lossless WEBP with alpha
    Webp,
}

impl ExportFormat {
    /// File extension without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }

    /// Human-readable format name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Webp => "WEBP",
        }
    }

    /// Whether the encoded file keeps an alpha channel
    pub const fn supports_transparency(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

/// Requested size, format and fill of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    /// Side of the exported square in pixels
    pub size_pixels: u32,
    /// Encoded format
    pub format: ExportFormat,
    /// Fill behind the pattern wherever the motif leaves the tile uncovered
    pub background: ColorSpec,
    /// Fill the background even when the motif covers the whole tile
    pub fill_background: bool,
    /// Number of tile repeats along each edge
    pub repeats: u32,
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            size_pixels: DEFAULT_EXPORT_SIZE,
            format: ExportFormat::Png,
            background: ColorSpec::default(),
            fill_background: false,
            repeats: 1,
        }
    }
}

impl ExportSpec {
    /// Create a single-repeat export spec with size clamped into range
    pub fn new(size_pixels: u32, format: ExportFormat, background: ColorSpec) -> Self {
        Self {
            size_pixels,
            format,
            background,
            ..Self::default()
        }
        .sanitized()
    }

    /// Copy with size and repeats clamped to their valid ranges
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            size_pixels: self.size_pixels.clamp(MIN_EXPORT_SIZE, MAX_EXPORT_SIZE),
            repeats: self.repeats.clamp(1, MAX_EXPORT_REPEATS),
            ..self.clone()
        }
    }

    /// Whether the background is filled regardless of motif coverage
    ///
    /// Opaque formats always fill. Formats with alpha fill only when asked
    /// to here, or when the motif leaves part of the tile uncovered.
    pub const fn forces_background(&self) -> bool {
        !self.format.supports_transparency() || self.fill_background
    }

    /// Tile side used for this export
    pub fn tile_size(&self) -> u32 {
        (self.size_pixels / self.repeats.max(1)).max(1)
    }

    /// Deterministic name, e.g. `pattern-tile-1024.png`
    pub fn file_name(&self) -> String {
        format!(
            "{EXPORT_FILE_PREFIX}-{}.{}",
            self.size_pixels,
            self.format.extension()
        )
    }
}

/// A rendered export surface ready to encode
#[derive(Debug, Clone)]
pub struct ExportedImage {
    file_name: String,
    format: ExportFormat,
    background_filled: bool,
    surface: RgbaImage,
}

impl ExportedImage {
    /// File name derived from size and format
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encoded format
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Whether the surface was filled with the export background
    pub const fn background_filled(&self) -> bool {
        self.background_filled
    }

    /// Rendered pixels before encoding
    pub const fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Encode the surface in the export's format
    ///
    /// JPEG output drops the alpha channel; the surface was filled opaque
    /// before painting so nothing is lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder rejects the surface
    pub fn encode(&self) -> Result<Vec<u8>> {
        let (width, height) = self.surface.dimensions();
        let mut bytes = Vec::new();

        let encoded = match self.format {
            ExportFormat::Png => PngEncoder::new(&mut bytes).write_image(
                self.surface.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
            ExportFormat::Jpeg => {
                let opaque = DynamicImage::ImageRgba8(self.surface.clone()).into_rgb8();
                JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).write_image(
                    opaque.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )
            }
            ExportFormat::Webp => WebPEncoder::new_lossless(&mut bytes).write_image(
                self.surface.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
        };

        encoded.map_err(|e| PatternError::ImageEncode {
            format: self.format.name(),
            source: e,
        })?;

        Ok(bytes)
    }

    /// Encode and write the file into `dir`, returning its path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be created
    /// - Encoding fails
    /// - The file cannot be written
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| PatternError::FileSystem {
            path: dir.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;

        let bytes = self.encode()?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, bytes).map_err(|e| PatternError::ImageExport {
            path: path.clone(),
            source: e,
        })?;

        log::info!("exported {}", path.display());
        Ok(path)
    }
}

/// Render the pattern at export resolution
///
/// Returns `None` when no image is loaded: exporting nothing is a silent
/// no-op. The export tile is `size / repeats` pixels and the motif keeps
/// its footprint relative to the preview tile.
///
/// Formats with alpha stay transparent only while the motif covers the
/// whole tile with opaque pixels; otherwise the gaps receive the export
/// background, as they would in an opaque format.
pub fn render_export(
    image: Option<&SourceImage>,
    parameters: &MotifParameters,
    spec: &ExportSpec,
) -> Option<ExportedImage> {
    let source = image?;
    let spec = spec.sanitized();
    let background = spec.background.resolve();

    let export_tile_size = spec.tile_size();
    let ratio = f64::from(export_tile_size) / f64::from(parameters.tile_size());
    let mut tile_spec = TileSpec {
        tile_size: export_tile_size,
        rotation_degrees: parameters.rotation_degrees,
        motif_pixel_size: parameters.motif_pixel_size() * ratio,
        background: if spec.forces_background() {
            background
        } else {
            TRANSPARENT
        },
    };

    let mut tile = build_tile_with_fill(Some(source), &tile_spec);
    if tile_spec.background == TRANSPARENT && !tile.is_opaque() {
        log::debug!("motif leaves gaps in the tile, filling export background");
        tile_spec.background = background;
        tile = build_tile_with_fill(Some(source), &tile_spec);
    }

    let fill = tile_spec.background;
    let mut surface = RgbaImage::from_pixel(spec.size_pixels, spec.size_pixels, fill);
    paint_pattern(&mut surface, &tile, Offset::default());

    Some(ExportedImage {
        file_name: spec.file_name(),
        format: spec.format,
        background_filled: fill != TRANSPARENT,
        surface,
    })
}
