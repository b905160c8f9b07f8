//! Terminal host for the cue engine.
//!
//! Owns the terminal (raw mode, alternate screen, mouse capture), runs the
//! event loop and feeds engine ticks into the UI state.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::input::{handle_event, Controls};
use super::playback::{CueEngine, EngineError, IntervalScheduler, SystemClock, TickReport};
use super::render::{draw, PlayerView};
use super::state::{InputResult, PlayerState};
use crate::idle::{self, IdleInhibitor, NoopInhibitor};
use crate::preferences::{SharedPreferences, SpeedSource, StoredSpeed};
use crate::subtitle::Cue;

/// Longest time the loop blocks on input while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Notice shown when the last cue is reached.
pub const END_NOTICE: &str = "End of captions";

/// How a player session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Left after the final cue was reached
    Finished,
    /// Left mid-way through the list
    Left,
    /// Ctrl+C
    Interrupted,
}

/// Knobs for a player session, usually taken from the config file.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub tick_interval: Duration,
    pub inhibit_idle: bool,
    /// Speed used when no preference is stored
    pub default_speed: f64,
    /// How long a speed change is remembered
    pub speed_ttl: chrono::Duration,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            tick_interval: CueEngine::DEFAULT_TICK_INTERVAL,
            inhibit_idle: true,
            default_speed: 1.0,
            speed_ttl: chrono::Duration::days(365),
        }
    }
}

/// Restores the terminal on drop, including on early return and panic unwind.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("Failed to set up terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}

/// Build the engine a terminal session runs on.
pub fn build_engine(preferences: &SharedPreferences, options: &PlayerOptions) -> CueEngine {
    let inhibitor: Box<dyn IdleInhibitor> = if options.inhibit_idle {
        idle::detect()
    } else {
        Box::new(NoopInhibitor::new())
    };
    CueEngine::new(SystemClock::new(), IntervalScheduler::new())
        .with_speed_source(StoredSpeed::new(preferences.clone(), options.default_speed))
        .with_idle_inhibitor(inhibitor)
        .with_tick_interval(options.tick_interval)
}

/// Play `cues` in the terminal until the user leaves.
///
/// Playback starts paused on the first cue; space starts it.
#[cfg(not(tarpaulin_include))]
pub fn play_cues(
    title: &str,
    cues: Vec<Cue>,
    preferences: SharedPreferences,
    options: &PlayerOptions,
) -> Result<PlaybackResult> {
    let mut engine = build_engine(&preferences, options);
    engine.load(cues);

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("Failed to create terminal")?;
    let size = terminal.size().context("Failed to read terminal size")?;
    let mut state = PlayerState::new(title, engine.cues().len(), size.height);

    let result = run_loop(&mut terminal, &mut engine, &mut state, &preferences, options);

    engine.pause();
    drop(guard);
    result
}

#[cfg(not(tarpaulin_include))]
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    engine: &mut CueEngine,
    state: &mut PlayerState,
    preferences: &SharedPreferences,
    options: &PlayerOptions,
) -> Result<PlaybackResult> {
    let display_speed = StoredSpeed::new(preferences.clone(), options.default_speed);

    loop {
        if state.needs_render {
            let view = PlayerView {
                state: &*state,
                cues: engine.cues(),
                snapshot: engine.snapshot(),
                speed: display_speed.speed_factor(),
            };
            terminal.draw(|frame| draw(frame, &view))?;
            state.needs_render = false;
        }

        let timeout = engine.time_until_tick().map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)? {
            let event = event::read()?;
            let mut controls = Controls::new(
                engine,
                preferences.clone(),
                options.default_speed,
                options.speed_ttl,
            );
            match handle_event(event, state, &mut controls) {
                InputResult::Continue => {}
                InputResult::Quit if state.ended => return Ok(PlaybackResult::Finished),
                InputResult::Quit => return Ok(PlaybackResult::Left),
                InputResult::Interrupt => return Ok(PlaybackResult::Interrupted),
            }
        }

        let previous = engine.current_index();
        if let Some(tick) = engine.poll_tick() {
            apply_tick(state, previous, tick);
        }
    }
}

/// Fold one tick's outcome into the UI state.
fn apply_tick(
    state: &mut PlayerState,
    previous: Option<usize>,
    tick: Result<TickReport, EngineError>,
) {
    match tick {
        Ok(report) => {
            if report.cue_changed {
                state.follow_cue(previous, report.index);
            }
            if report.ended {
                state.ended = true;
                state.set_notice(END_NOTICE);
            }
            // Timestamp moved
            state.needs_render = true;
        }
        Err(e) => tracing::debug!("tick skipped: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(index: usize, cue_changed: bool, ended: bool) -> TickReport {
        TickReport {
            index,
            total_time: 1.0,
            timestamp: "00:00:01".to_string(),
            cue_changed,
            ended,
        }
    }

    #[test]
    fn tick_without_change_only_rerenders() {
        let mut state = PlayerState::new("t", 40, 13);
        state.needs_render = false;
        apply_tick(&mut state, Some(0), Ok(report(0, false, false)));
        assert!(state.needs_render);
        assert_eq!(state.cursor, 0);
        assert!(!state.ended);
    }

    #[test]
    fn cue_change_follows_when_visible() {
        let mut state = PlayerState::new("t", 40, 13);
        apply_tick(&mut state, Some(8), Ok(report(9, true, false)));
        assert_eq!(state.cursor, 9);
        assert!(state.is_visible(9));
    }

    #[test]
    fn end_sets_notice() {
        let mut state = PlayerState::new("t", 2, 13);
        apply_tick(&mut state, Some(0), Ok(report(1, true, true)));
        assert!(state.ended);
        assert_eq!(state.notice.as_deref(), Some(END_NOTICE));
    }

    #[test]
    fn tick_errors_leave_state_alone() {
        let mut state = PlayerState::new("t", 2, 13);
        state.needs_render = false;
        apply_tick(&mut state, Some(0), Err(EngineError::NotPlaying));
        assert!(!state.needs_render);
    }

    #[test]
    fn build_engine_respects_options() {
        let preferences = crate::preferences::MemoryPreferences::new().shared();
        let options = PlayerOptions {
            tick_interval: Duration::from_millis(20),
            inhibit_idle: false,
            default_speed: 1.5,
            ..Default::default()
        };
        let engine = build_engine(&preferences, &options);
        assert_eq!(engine.speed_factor(), 1.5);
        assert!(engine.cues().is_empty());
    }
}
