//! Terminal subtitle player
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `playback/`: the clock and cue cursor engine (no terminal code)
//! - `state`: `PlayerState` and shared types (`Mode`, `InputResult`)
//! - `input/`: Keyboard and mouse input handling
//! - `render/`: ratatui rendering (cue list, status bar, footer, modals)
//!
//! # Usage
//!
//! ```no_run
//! use subfollow::player::{play_cues, PlaybackResult, PlayerOptions};
//! use subfollow::preferences::MemoryPreferences;
//! use subfollow::subtitle::parse;
//!
//! let cues = parse("1\n00:00:01,000 --> 00:00:02,000\nHello\n").cues;
//! let prefs = MemoryPreferences::new().shared();
//! match play_cues("demo", cues, prefs, &PlayerOptions::default()).unwrap() {
//!     PlaybackResult::Finished => println!("Done"),
//!     PlaybackResult::Left | PlaybackResult::Interrupted => println!("Stopped"),
//! }
//! ```

pub(crate) mod input;
mod native;
pub mod playback;
pub mod render;
pub mod state;

pub use native::{build_engine, play_cues, PlaybackResult, PlayerOptions, END_NOTICE};
pub use state::{InputResult, Mode, PlayerState};
