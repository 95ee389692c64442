//! Hex color text with a forgiving resolution to RGBA

use crate::io::configuration::DEFAULT_BACKGROUND;
use image::Rgba;

/// Color as typed by the user, kept verbatim until it is resolved
///
/// Invalid text is not an error: it resolves to the fixed default background
/// while the literal is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorSpec {
    literal: String,
}

impl ColorSpec {
    /// Wrap the literal color text
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// The text exactly as it was supplied
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Whether the literal parses as a six digit hex color
    pub fn is_valid(&self) -> bool {
        parse_hex(&self.literal).is_some()
    }

    /// Resolve to an opaque color, falling back to the default
    pub fn resolve(&self) -> Rgba<u8> {
        resolve_color(&self.literal)
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::new(crate::io::configuration::DEFAULT_BACKGROUND_HEX)
    }
}

impl From<&str> for ColorSpec {
    fn from(literal: &str) -> Self {
        Self::new(literal)
    }
}

/// Resolve hex color text such as `#1a2b3c` or `1A2B3C`
///
/// Anything other than exactly six hex digits (with an optional leading `#`)
/// yields [`DEFAULT_BACKGROUND`].
pub fn resolve_color(text: &str) -> Rgba<u8> {
    parse_hex(text).map_or(Rgba(DEFAULT_BACKGROUND), |[r, g, b]| Rgba([r, g, b, 255]))
}

fn parse_hex(text: &str) -> Option<[u8; 3]> {
    let digits = text.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
