//! subfollow - follow subtitle cues against a playback clock
//!
//! Parses subtitle files into cues and runs a playback clock that keeps the
//! "current cue" in step with elapsed time, across pause, resume, seek and
//! speed changes. A terminal player is built on top.
//!
//! - [`subtitle`]: cue parsing and timestamps
//! - [`player::playback`]: the clock and cursor engine
//! - [`player`]: the terminal host (ratatui)
//! - [`preferences`]: the persisted speed preference
//! - [`idle`]: keeping the screen awake while playing

pub mod cli;
pub mod config;
pub mod idle;
pub mod logging;
pub mod player;
pub mod preferences;
pub mod subtitle;
pub mod theme;

pub use config::Config;
pub use player::playback::CueEngine;
pub use subtitle::{parse, Cue, ParseOutcome};
