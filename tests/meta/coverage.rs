//! Repository checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Tests every source file and directory has a unit test counterpart
    // Verified by adding a source file without tests
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src_paths, test_paths) = mirrored_paths();

        let mut missing: Vec<&String> = src_paths
            .iter()
            // Entry points and module declarations carry no logic of their own
            .filter(|path| {
                path.as_str() != "main.rs" && path.as_str() != "lib.rs" && !path.ends_with("mod.rs")
            })
            .filter(|path| !test_paths.contains(*path))
            .collect();
        missing.sort();

        assert!(
            missing.is_empty(),
            "Source paths without unit tests:\n{}",
            missing
                .iter()
                .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests no unit test outlives the source it covered
    // Verified by leaving a test file for a deleted module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src_paths, test_paths) = mirrored_paths();

        let mut orphaned: Vec<&String> = test_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs"))
            .filter(|path| !src_paths.contains(*path))
            .collect();
        orphaned.sort();

        assert!(
            orphaned.is_empty(),
            "Unit tests without a source counterpart:\n{}",
            orphaned
                .iter()
                .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests every test file declares at least one test
    // Verified by adding a test file with only helpers
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut empty_files = Vec::new();

        if let Err(error) = find_files_without_tests(tests_dir, tests_dir, &mut empty_files) {
            assert!(!tests_dir.exists(), "Failed to scan tests directory: {error}");
        }

        assert!(
            empty_files.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty_files.join("\n")
        );
    }

    fn mirrored_paths() -> (HashSet<String>, HashSet<String>) {
        let src_dir = Path::new(SRC_DIR);
        let unit_dir = Path::new(UNIT_DIR);

        let src_paths = collect_relative_paths(src_dir, src_dir).unwrap_or_else(|error| {
            assert!(!src_dir.exists(), "Failed to read src directory: {error}");
            HashSet::new()
        });
        let test_paths = collect_relative_paths(unit_dir, unit_dir).unwrap_or_default();

        (src_paths, test_paths)
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> io::Result<HashSet<String>> {
        let mut paths = HashSet::new();

        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_strip_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }

        Ok(paths)
    }

    fn find_files_without_tests(
        dir: &Path,
        base_dir: &Path,
        empty_files: &mut Vec<String>,
    ) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                find_files_without_tests(&path, base_dir, empty_files)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            // The harness root and module declarations only wire files together
            if (path.parent() == Some(base_dir) && file_name == "main.rs") || file_name == "mod.rs"
            {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                empty_files.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }
}
