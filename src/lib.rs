//! Seamless pattern tiles from a single motif image
//!
//! A source image is fitted, rotated and centered on a square tile over a
//! solid background, and the tile is then repeated across preview or export
//! surfaces on a purely translational grid.

#![forbid(unsafe_code)]

/// Tile building, pattern painting and tile memoization
pub mod composite;
/// Session, preview, export, configuration and error handling
pub mod io;
/// Motif parameters, colors and source images
pub mod motif;

pub use composite::{Offset, Tile, build_tile, paint_pattern};
pub use io::error::{PatternError, Result};
pub use motif::{ColorSpec, MotifParameters, SourceImage, resolve_color};
