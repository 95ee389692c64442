//! Motif description: source image, repeat parameters and colors
//!
//! This module contains the value types the compositing core reads:
//! - Color text resolution with a fixed fallback
//! - Motif parameters and their pixel-size mapping
//! - Decoded source images

/// Hex color parsing with fallback
pub mod color;
/// Motif knobs and derived pixel sizes
pub mod parameters;
/// Decoded source images
pub mod source;

pub use color::{ColorSpec, resolve_color};
pub use parameters::MotifParameters;
pub use source::SourceImage;
