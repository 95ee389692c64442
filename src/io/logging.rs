//! Logger initialization for the command-line front end

use clap::ValueEnum;
use env_logger::WriteStyle;
use std::sync::Once;

/// When log lines on stderr carry ANSI colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogColor {
    /// Color only when stderr is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<LogColor> for WriteStyle {
    fn from(color: LogColor) -> Self {
        match color {
            LogColor::Auto => Self::Auto,
            LogColor::Always => Self::Always,
            LogColor::Never => Self::Never,
        }
    }
}

/// Logger configuration
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "motiftile=debug"). When absent, `RUST_LOG` is consulted before falling
/// back to warnings only, which keeps progress bars readable.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter directives
    pub env_filter: Option<String>,
    /// ANSI coloring behavior
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Configuration that only reports errors
    pub fn quiet() -> Self {
        Self {
            env_filter: Some("error".to_string()),
            ..Self::default()
        }
    }

    /// Same configuration with the given coloring
    #[must_use]
    pub fn with_color(self, color: LogColor) -> Self {
        Self {
            write_style: color.into(),
            ..self
        }
    }
}

static INIT: Once = Once::new();

/// Initialize the global logger once
///
/// Subsequent calls are ignored, as is a logger installed by someone else.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
