//! `subfollow play`

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use subfollow::config::TICK_INTERVAL_RANGE;
use subfollow::player::{play_cues, PlaybackResult};
use subfollow::preferences::{MemoryPreferences, SharedPreferences};
use subfollow::subtitle::{load_source, parse};
use subfollow::theme::current_theme;
use subfollow::Config;

/// Play a subtitle file in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, interval: Option<u64>, no_idle_inhibit: bool, config: &Config) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        bail!("play needs an interactive terminal; use `subfollow parse` to list cues");
    }

    let raw = load_source(file)?;
    let cues = parse(&raw)
        .into_result()
        .with_context(|| format!("Nothing to play in {}", file.display()))?;

    let mut options = config.player_options();
    if let Some(ms) = interval {
        let (min, max) = TICK_INTERVAL_RANGE;
        options.tick_interval = Duration::from_millis(ms.clamp(min, max));
    }
    if no_idle_inhibit {
        options.inhibit_idle = false;
    }

    let preferences: SharedPreferences = match super::open_preferences(config) {
        Ok(store) => store.shared(),
        Err(e) => {
            // Speed changes won't persist, playback still works
            tracing::warn!("{:#}", e);
            MemoryPreferences::new().shared()
        }
    };

    let title = super::source_title(file);
    tracing::info!(file = %file.display(), cues = cues.len(), "starting player");
    let result = play_cues(&title, cues, preferences, &options)?;

    let theme = current_theme();
    match result {
        PlaybackResult::Finished => println!("{}", theme.success_text(&format!("Finished {}", title))),
        PlaybackResult::Left => {}
        PlaybackResult::Interrupted => println!("{}", theme.secondary_text("Interrupted")),
    }
    Ok(())
}
