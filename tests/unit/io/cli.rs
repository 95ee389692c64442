//! Tests for command-line parsing and the pattern runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use motiftile::Offset;
    use motiftile::io::cli::{Cli, Dimensions, PatternRunner, parse_dimensions, parse_offset};
    use motiftile::io::configuration::{
        DEFAULT_BACKGROUND_HEX, DEFAULT_EXPORT_SIZE, DEFAULT_SCALE, DEFAULT_SPACING,
        MAX_EXPORT_SIZE,
    };
    use env_logger::WriteStyle;
    use motiftile::io::export::ExportFormat;
    use motiftile::io::logging::LogColor;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_motif(dir: &Path) -> PathBuf {
        let path = dir.join("motif.png");
        RgbaImage::from_pixel(20, 10, Rgba([200, 40, 40, 255]))
            .save(&path)
            .unwrap();
        path
    }

    // Tests CLI parsing with no arguments at all
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.image, None);
        assert!((cli.scale - DEFAULT_SCALE).abs() < 1e-12);
        assert!((cli.spacing - DEFAULT_SPACING).abs() < 1e-12);
        assert_eq!(cli.background, DEFAULT_BACKGROUND_HEX);
        assert_eq!(cli.sizes, vec![DEFAULT_EXPORT_SIZE]);
        assert_eq!(cli.formats, vec![ExportFormat::Png]);
        assert_eq!(cli.offset, Offset::default());
        assert_eq!(cli.preview, None);
        assert!(!cli.quiet);
        assert_eq!(cli.color, LogColor::Auto);
    }

    // Tests CLI parsing with every argument supplied
    // Verified by modifying custom parsers to ensure they're invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "motif.png",
            "--scale",
            "0.5",
            "--spacing",
            "2",
            "--rotation",
            "-30",
            "--background",
            "#ffffff",
            "--size",
            "512",
            "--size",
            "2048",
            "--format",
            "jpeg",
            "--format",
            "webp",
            "--export-background",
            "#000000",
            "--fill-background",
            "--repeats",
            "3",
            "--out-dir",
            "out",
            "--preview",
            "300x200",
            "--offset",
            "-12,40",
            "--quiet",
            "--color",
            "never",
        ]);

        assert_eq!(cli.image, Some(PathBuf::from("motif.png")));
        assert!((cli.rotation + 30.0).abs() < 1e-12);
        assert_eq!(cli.sizes, vec![512, 2048]);
        assert_eq!(cli.formats, vec![ExportFormat::Jpeg, ExportFormat::Webp]);
        assert_eq!(cli.export_background.as_deref(), Some("#000000"));
        assert!(cli.fill_background);
        assert_eq!(cli.repeats, 3);
        assert_eq!(cli.out_dir, PathBuf::from("out"));
        assert_eq!(
            cli.preview,
            Some(Dimensions {
                width: 300,
                height: 200
            })
        );
        assert_eq!(cli.offset, Offset::new(-12, 40));
        assert!(cli.quiet);
        assert_eq!(cli.color, LogColor::Never);
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["program"]).should_show_progress());
        assert!(!Cli::parse_from(["program", "-q"]).should_show_progress());
    }

    // Tests quiet and color flags shape the logger
    // Verified by dropping the color flag from the logger settings
    #[test]
    fn test_logging_config_from_args() {
        let default = Cli::parse_from(["program"]).logging_config();
        assert!(default.env_filter.is_none());
        assert_eq!(default.write_style, WriteStyle::Auto);

        let quiet = Cli::parse_from(["program", "-q", "--color", "always"]).logging_config();
        assert_eq!(quiet.env_filter.as_deref(), Some("error"));
        assert_eq!(quiet.write_style, WriteStyle::Always);
    }

    // Tests arguments become clamped motif parameters
    // Verified by skipping sanitization of the parsed values
    #[test]
    fn test_motif_parameters_from_args() {
        let cli = Cli::parse_from(["program", "-s", "50", "-r", "-90", "-b", "#ff0000"]);
        let parameters = cli.motif_parameters();

        assert!(parameters.scale <= 10.0);
        assert!((parameters.rotation_degrees - 270.0).abs() < 1e-9);
        assert_eq!(parameters.background.resolve(), Rgba([255, 0, 0, 255]));
    }

    // Tests every size and format combination yields a spec
    // Verified by zipping sizes with formats instead of crossing them
    #[test]
    fn test_export_specs_cross_product() {
        let cli = Cli::parse_from([
            "program", "-S", "100", "-S", "99999", "-f", "png", "-f", "jpeg",
        ]);
        let specs = cli.export_specs();

        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].file_name(), "pattern-tile-100.png");
        assert_eq!(specs[1].file_name(), "pattern-tile-100.jpg");
        assert_eq!(specs[2].size_pixels, MAX_EXPORT_SIZE);
        assert_eq!(specs[3].format, ExportFormat::Jpeg);
    }

    // Tests export background falls back to the tile background
    // Verified by defaulting the export background to white
    #[test]
    fn test_export_background_fallback() {
        let inherited = Cli::parse_from(["program", "-b", "#123456"]).export_specs();
        assert_eq!(inherited[0].background.as_str(), "#123456");

        let explicit =
            Cli::parse_from(["program", "-b", "#123456", "--export-background", "#abcdef"])
                .export_specs();
        assert_eq!(explicit[0].background.as_str(), "#abcdef");
    }

    // Tests WxH parsing and its rejections
    // Verified by accepting zero-sized previews
    #[test]
    fn test_parse_dimensions() {
        assert_eq!(
            parse_dimensions("960x640"),
            Ok(Dimensions {
                width: 960,
                height: 640
            })
        );
        assert_eq!(
            parse_dimensions("12X7"),
            Ok(Dimensions {
                width: 12,
                height: 7
            })
        );
        assert!(parse_dimensions("960").is_err());
        assert!(parse_dimensions("0x10").is_err());
        assert!(parse_dimensions("ax10").is_err());
    }

    // Tests X,Y parsing including negative values
    // Verified by parsing offsets as unsigned integers
    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("12,-40"), Ok(Offset::new(12, -40)));
        assert_eq!(parse_offset(" -3 , 4 "), Ok(Offset::new(-3, 4)));
        assert!(parse_offset("12").is_err());
        assert!(parse_offset("1.5,2").is_err());
    }

    // Tests a full run writes the preview and every export
    // Verified by skipping exports when a preview was requested
    #[test]
    fn test_runner_writes_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let motif = write_motif(temp_dir.path());
        let out_dir = temp_dir.path().join("out");

        let cli = Cli::parse_from([
            "program",
            motif.to_str().unwrap(),
            "-q",
            "-S",
            "64",
            "-f",
            "png",
            "-f",
            "jpeg",
            "-p",
            "50x30",
            "-o",
            out_dir.to_str().unwrap(),
        ]);
        let mut runner = PatternRunner::new(cli);
        let summary = runner.run().unwrap();

        assert_eq!(
            summary.exports,
            vec![
                out_dir.join("pattern-tile-64.png"),
                out_dir.join("pattern-tile-64.jpg")
            ]
        );
        assert_eq!(summary.preview, Some(out_dir.join("pattern-preview-50x30.png")));
        for path in summary.exports.iter().chain(summary.preview.iter()) {
            assert!(path.exists(), "missing {}", path.display());
        }
        assert!(runner.session().image().is_some());
    }

    // Tests an unreadable image leaves a background-only run
    // Verified by aborting the run on load failure
    #[test]
    fn test_runner_continues_without_image() {
        let temp_dir = TempDir::new().unwrap();
        let bogus = temp_dir.path().join("motif.png");
        std::fs::write(&bogus, "not a png").unwrap();

        let cli = Cli::parse_from([
            "program",
            bogus.to_str().unwrap(),
            "-q",
            "-b",
            "#00ff00",
            "-p",
            "8x8",
            "-o",
            temp_dir.path().to_str().unwrap(),
        ]);
        let mut runner = PatternRunner::new(cli);
        let summary = runner.run().unwrap();

        assert!(summary.exports.is_empty());
        let preview = image::open(summary.preview.unwrap()).unwrap().to_rgba8();
        assert!(preview.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
        assert!(runner.session().image().is_none());
    }
}
