//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory holding the `.srt` fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path to a fixture by file name.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture as text.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// Copy a fixture into a fresh temp dir. Keep the `TempDir` alive while
/// the path is in use.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::copy(fixture_path(name), &path).expect("Failed to copy fixture");
    (dir, path)
}

/// A config file inside `dir` that keeps preferences and logs in `dir` too,
/// so CLI tests never touch the real user directories.
pub fn isolated_config(dir: &Path) -> PathBuf {
    let config = dir.join("config.toml");
    let prefs = dir.join("preferences.toml");
    let log = dir.join("subfollow.log");
    fs::write(
        &config,
        format!(
            "[preferences]\nfile = {:?}\n\n[logging]\nlevel = \"warn\"\nfile = {:?}\n",
            prefs.display().to_string(),
            log.display().to_string()
        ),
    )
    .expect("Failed to write config");
    config
}
