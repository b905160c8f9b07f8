//! `subfollow speed`

use anyhow::{Context, Result};
use subfollow::preferences::{parse_speed, store_speed, PreferenceStore, SPEED_KEY};
use subfollow::theme::current_theme;
use subfollow::Config;

/// Show, set or reset the stored playback speed.
pub fn handle(value: Option<&str>, reset: bool, config: &Config) -> Result<()> {
    let mut store = super::open_preferences(config)?;
    let theme = current_theme();

    if reset {
        store.remove(SPEED_KEY)?;
        println!(
            "Speed reset to default ({}x)",
            config.playback.default_speed
        );
        return Ok(());
    }

    if let Some(value) = value {
        let speed = parse_speed(value).context("Please enter a valid number.")?;
        store_speed(&mut store, speed, config.speed_ttl())?;
        println!("{}", theme.success_text(&format!("Speed set to {}x", speed)));
        return Ok(());
    }

    println!(
        "{}",
        describe_speed(store.get(SPEED_KEY), config.playback.default_speed)
    );
    Ok(())
}

/// Text for the current speed: the stored value, or the default when
/// nothing valid is stored.
pub fn describe_speed(stored: Option<String>, default: f64) -> String {
    match stored.as_deref().map(parse_speed) {
        Some(Ok(speed)) => format!("{}x (stored)", speed),
        _ => format!("{}x (default)", default),
    }
}
