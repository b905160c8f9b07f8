//! `subfollow parse`

use std::path::Path;

use anyhow::{Context, Result};
use subfollow::subtitle::{format_srt_timestamp, load_source, parse, Cue};
use subfollow::theme::{current_theme, Theme};

/// Parse a subtitle file and print its cues.
///
/// Skipped lines are reported through the log (stderr); a file without any
/// cue is an error.
pub fn handle(file: &Path, json: bool) -> Result<()> {
    let raw = load_source(file)?;
    let outcome = parse(&raw);
    let warnings = outcome.warnings.len();
    let cues = outcome
        .into_result()
        .with_context(|| format!("No cues in {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cues)?);
    } else {
        let theme = atty::is(atty::Stream::Stdout).then(current_theme);
        for cue in &cues {
            println!("{}", format_cue(cue, theme.as_ref()));
        }
    }

    eprintln!("{} cue(s), {} warning(s)", cues.len(), warnings);
    Ok(())
}

/// `#<seq> <start> --> <end> <text>`, timestamps colored when `theme` is set.
pub fn format_cue(cue: &Cue, theme: Option<&Theme>) -> String {
    let timing = format!(
        "{} --> {}",
        format_srt_timestamp(cue.start_seconds),
        format_srt_timestamp(cue.end_seconds)
    );
    let timing = match theme {
        Some(theme) => theme.accent_text(&timing),
        None => timing,
    };
    format!("#{} {} {}", cue.sequence, timing, cue.display_text())
}
