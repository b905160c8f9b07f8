//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use subfollow::theme::current_theme;
use subfollow::Config;

fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print where the config file lives.
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(explicit)?.display());
    Ok(())
}

/// Write a config file with default values.
pub fn handle_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_path(explicit)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save_to(&path)?;
    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!("Wrote {}", path.display()))
    );
    Ok(())
}
