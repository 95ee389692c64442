//! Command-line front end driving one pattern session end to end

use crate::composite::painter::Offset;
use crate::io::configuration::{
    DEFAULT_BACKGROUND_HEX, DEFAULT_EXPORT_SIZE, DEFAULT_ROTATION, DEFAULT_SCALE, DEFAULT_SPACING,
};
use crate::io::error::Result;
use crate::io::export::{ExportFormat, ExportSpec};
use crate::io::logging::{LogColor, LoggingConfig};
use crate::io::preview::PreviewSurface;
use crate::io::progress::ProgressManager;
use crate::io::session::Session;
use crate::motif::{ColorSpec, MotifParameters};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Width and height of a preview surface, parsed from `WxH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

#[derive(Parser)]
#[command(name = "motiftile")]
#[command(
    author,
    version,
    about = "Turn a single image into a seamless repeating tile pattern"
)]
/// Command-line arguments for the pattern tool
pub struct Cli {
    /// Motif image in any common raster format
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Motif size relative to the 1600px reference
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Spacing factor; larger values give smaller, denser tiles
    #[arg(short = 'g', long, default_value_t = DEFAULT_SPACING)]
    pub spacing: f64,

    /// Clockwise motif rotation in degrees
    #[arg(short, long, default_value_t = DEFAULT_ROTATION, allow_negative_numbers = true)]
    pub rotation: f64,

    /// Tile background as six hex digits
    #[arg(short, long, default_value = DEFAULT_BACKGROUND_HEX)]
    pub background: String,

    /// Export side in pixels (repeatable)
    #[arg(short = 'S', long = "size", default_values_t = [DEFAULT_EXPORT_SIZE])]
    pub sizes: Vec<u32>,

    /// Export format (repeatable)
    #[arg(short, long = "format", value_enum, default_value = "png")]
    pub formats: Vec<ExportFormat>,

    /// Export background, defaults to the tile background
    #[arg(long, value_name = "HEX")]
    pub export_background: Option<String>,

    /// Fill PNG and WEBP backgrounds even under a fully covering motif
    #[arg(short = 'F', long)]
    pub fill_background: bool,

    /// Tile repeats along each edge of an export
    #[arg(long, default_value_t = 1)]
    pub repeats: u32,

    /// Directory receiving exports and the preview
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also render a preview of the given size, e.g. 960x640
    #[arg(short, long, value_name = "WxH", value_parser = parse_dimensions)]
    pub preview: Option<Dimensions>,

    /// Anchor of the preview grid, e.g. 12,-40
    #[arg(long, value_name = "X,Y", default_value = "0,0", value_parser = parse_offset, allow_hyphen_values = true)]
    pub offset: Offset,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Color log output
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = LogColor::Auto)]
    pub color: LogColor,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Logger settings for the requested verbosity and coloring
    pub fn logging_config(&self) -> LoggingConfig {
        let config = if self.quiet {
            LoggingConfig::quiet()
        } else {
            LoggingConfig::default()
        };
        config.with_color(self.color)
    }

    /// Motif parameters described by the arguments, clamped into range
    pub fn motif_parameters(&self) -> MotifParameters {
        MotifParameters::new(
            self.scale,
            self.spacing,
            self.rotation,
            ColorSpec::new(self.background.as_str()),
        )
    }

    /// One export spec per requested size and format combination
    pub fn export_specs(&self) -> Vec<ExportSpec> {
        let background = ColorSpec::new(
            self.export_background
                .as_deref()
                .unwrap_or(self.background.as_str()),
        );

        self.sizes
            .iter()
            .flat_map(|&size_pixels| {
                let background = background.clone();
                self.formats.iter().map(move |&format| {
                    ExportSpec {
                        size_pixels,
                        format,
                        background: background.clone(),
                        fill_background: self.fill_background,
                        repeats: self.repeats,
                    }
                    .sanitized()
                })
            })
            .collect()
    }
}

/// Parse `WxH` into preview dimensions
///
/// # Errors
///
/// Returns a message if the text is not two positive integers joined by `x`
pub fn parse_dimensions(text: &str) -> std::result::Result<Dimensions, String> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{text}'"))?;
    let parse = |side: &str| {
        side.trim()
            .parse::<u32>()
            .ok()
            .filter(|&value| value > 0)
            .ok_or_else(|| format!("'{side}' is not a positive integer"))
    };

    Ok(Dimensions {
        width: parse(width)?,
        height: parse(height)?,
    })
}

/// Parse `X,Y` into a grid offset
///
/// # Errors
///
/// Returns a message if the text is not two integers joined by a comma
pub fn parse_offset(text: &str) -> std::result::Result<Offset, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{text}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("'{value}' is not an integer: {e}"))
    };

    Ok(Offset::new(parse(x)?, parse(y)?))
}

/// Files produced by one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Written export files, in request order
    pub exports: Vec<PathBuf>,
    /// Written preview file, if one was requested
    pub preview: Option<PathBuf>,
}

/// Runs a session from command-line arguments with progress tracking
pub struct PatternRunner {
    cli: Cli,
    session: Session,
    progress_manager: Option<ProgressManager>,
}

impl PatternRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let session = Session::with_parameters(&cli.motif_parameters());

        Self {
            cli,
            session,
            progress_manager,
        }
    }

    /// Session driven by this runner
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Load the image, render the preview and write every export
    ///
    /// A missing or unreadable image is reported and the run continues
    /// without one: the preview shows only the background and exports are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a preview or export file cannot be written
    pub fn run(&mut self) -> Result<RunSummary> {
        self.load_image();

        let mut summary = RunSummary {
            preview: self.write_preview()?,
            ..RunSummary::default()
        };

        let specs = self.cli.export_specs();
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(specs.len());
        }

        for (index, spec) in specs.iter().enumerate() {
            if let Some(path) = self.export_one(index, spec)? {
                summary.exports.push(path);
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    // Allow print for user feedback on unreadable images
    #[allow(clippy::print_stderr)]
    fn load_image(&mut self) {
        let Some(path) = self.cli.image.clone() else {
            return;
        };

        if self.session.load_image(&path).is_err() && !self.cli.quiet {
            for notice in self.session.take_notices() {
                eprintln!("{} (continuing without an image)", notice.message);
            }
        }
    }

    fn write_preview(&mut self) -> Result<Option<PathBuf>> {
        let Some(dimensions) = self.cli.preview else {
            return Ok(None);
        };

        let mut surface = PreviewSurface::new(dimensions.width, dimensions.height);
        surface.set_offset(self.cli.offset);
        self.session.render_preview(&mut surface);

        let path = Self::preview_path(&self.cli.out_dir, dimensions);
        surface.save_png(&path)?;
        Ok(Some(path))
    }

    fn export_one(&mut self, index: usize, spec: &ExportSpec) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_job(index, &spec.file_name());
        }

        let Some(exported) = self.session.export(spec) else {
            if let Some(ref mut pm) = self.progress_manager {
                pm.skip_job(index, "no image loaded");
            }
            return Ok(None);
        };

        let path = exported.write_to_dir(&self.cli.out_dir)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_job(index, start_time.elapsed());
        }

        Ok(Some(path))
    }

    fn preview_path(out_dir: &Path, dimensions: Dimensions) -> PathBuf {
        out_dir.join(format!(
            "pattern-preview-{}x{}.png",
            dimensions.width, dimensions.height
        ))
    }
}
