//! Subcommand handlers for the `subfollow` binary.

pub mod completions;
pub mod config;
pub mod parse;
pub mod play;
pub mod speed;

use std::path::Path;

use anyhow::{Context, Result};
use subfollow::preferences::FilePreferences;
use subfollow::Config;

/// Load the config from `--config` if given, else the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Open the preferences file named by the config.
pub fn open_preferences(config: &Config) -> Result<FilePreferences> {
    let path = config.preferences_path()?;
    FilePreferences::open(&path).with_context(|| format!("Failed to open {}", path.display()))
}

/// File name shown for a source path (`stdin` for `-`).
pub fn source_title(path: &Path) -> String {
    if path.as_os_str() == "-" {
        return "stdin".to_string();
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_title_uses_file_name() {
        assert_eq!(source_title(Path::new("/music/song.srt")), "song.srt");
        assert_eq!(source_title(Path::new("-")), "stdin");
    }
}
