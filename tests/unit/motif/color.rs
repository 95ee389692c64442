//! Tests for hex color resolution and literal preservation

#[cfg(test)]
mod tests {
    use image::Rgba;
    use motiftile::io::configuration::DEFAULT_BACKGROUND;
    use motiftile::motif::color::{ColorSpec, resolve_color};

    // Tests a well-formed color resolves exactly
    // Verified by swapping the red and blue channels
    #[test]
    fn test_resolve_exact_color() {
        assert_eq!(resolve_color("#1a2b3c"), Rgba([0x1a, 0x2b, 0x3c, 0xff]));
    }

    // Tests the hash is optional and case does not matter
    // Verified by requiring a lowercase prefixed literal
    #[test]
    fn test_resolve_lenient_forms() {
        assert_eq!(resolve_color("1A2B3C"), Rgba([0x1a, 0x2b, 0x3c, 0xff]));
        assert_eq!(resolve_color("#FFFFFF"), Rgba([255, 255, 255, 255]));
        assert_eq!(resolve_color("  #000000 "), Rgba([0, 0, 0, 255]));
    }

    // Tests malformed text falls back to the documented default
    // Verified by returning black on parse failure
    #[test]
    fn test_resolve_falls_back() {
        for text in ["not-a-color", "", "#", "#12345", "#1234567", "#gg0000", "##123456", "#1a2b3c4d"] {
            assert_eq!(resolve_color(text), Rgba(DEFAULT_BACKGROUND), "text {text:?}");
        }
    }

    // Tests the literal survives resolution untouched
    // Verified by normalizing the literal on construction
    #[test]
    fn test_color_spec_keeps_literal() {
        let spec = ColorSpec::new("#ABC-typo");

        assert_eq!(spec.as_str(), "#ABC-typo");
        assert!(!spec.is_valid());
        assert_eq!(spec.resolve(), Rgba(DEFAULT_BACKGROUND));
    }

    // Tests default and conversion constructors
    // Verified by defaulting to an empty literal
    #[test]
    fn test_color_spec_default_and_from() {
        assert!(ColorSpec::default().is_valid());
        assert_eq!(ColorSpec::default().resolve(), Rgba(DEFAULT_BACKGROUND));
        assert_eq!(ColorSpec::from("#010203").resolve(), Rgba([1, 2, 3, 255]));
    }
}
