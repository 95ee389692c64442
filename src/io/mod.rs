//! Host layer around the compositing core: session state, preview, export
//! and the ambient command-line stack

/// Command-line parsing and the export runner
pub mod cli;
/// Constants, clamp ranges and defaults
pub mod configuration;
/// Error types for all pattern operations
pub mod error;
/// Export rendering, encoding and file naming
pub mod export;
/// Logger initialization
pub mod logging;
/// Live preview surface
pub mod preview;
/// Progress display for export runs
pub mod progress;
/// Owning session state with memoized tiles
pub mod session;
