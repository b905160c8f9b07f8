//! Transport actions shared by keyboard and mouse handlers.

use crate::player::playback::{CueEngine, TransportPhase};
use crate::player::state::PlayerState;
use crate::preferences::{
    parse_speed, speed_down, speed_up, store_speed, SharedPreferences, SpeedSource, StoredSpeed,
};

/// Message shown when a typed speed is rejected.
pub const INVALID_SPEED: &str = "Please enter a valid number.";

/// Everything an input handler may act on besides the UI state.
pub struct Controls<'a> {
    pub engine: &'a mut CueEngine,
    pub preferences: SharedPreferences,
    /// Reads the same store the engine reads, for display and stepping
    pub speed: StoredSpeed,
    pub speed_ttl: chrono::Duration,
}

impl<'a> Controls<'a> {
    pub fn new(
        engine: &'a mut CueEngine,
        preferences: SharedPreferences,
        default_speed: f64,
        speed_ttl: chrono::Duration,
    ) -> Self {
        let speed = StoredSpeed::new(preferences.clone(), default_speed);
        Self {
            engine,
            preferences,
            speed,
            speed_ttl,
        }
    }

    /// Speed factor the next tick will use.
    pub fn current_speed(&self) -> f64 {
        self.speed.speed_factor()
    }
}

/// Play/pause button.
pub fn toggle_playback(state: &mut PlayerState, controls: &mut Controls) {
    match controls.engine.toggle() {
        Ok(TransportPhase::Playing) => {
            state.ended = false;
            state.clear_notice();
        }
        Ok(_) => {}
        Err(e) => state.set_notice(e.to_string()),
    }
    state.needs_render = true;
}

/// Jump to cue `index` and play from its start.
pub fn seek_and_play(state: &mut PlayerState, controls: &mut Controls, index: usize) {
    let result = controls
        .engine
        .seek(index)
        .and_then(|_| controls.engine.start());
    match result {
        Ok(_) => {
            state.cursor = index;
            state.ended = false;
            state.jump_hint = false;
            state.clear_notice();
        }
        Err(e) => state.set_notice(e.to_string()),
    }
    state.needs_render = true;
}

/// Re-centre the view on the active cue.
pub fn jump_to_current(state: &mut PlayerState, controls: &Controls) {
    if let Some(index) = controls.engine.current_index() {
        state.center_on(index);
    }
}

pub fn faster(state: &mut PlayerState, controls: &mut Controls) {
    let speed = speed_up(controls.current_speed());
    save_speed(state, controls, speed);
}

pub fn slower(state: &mut PlayerState, controls: &mut Controls) {
    let speed = speed_down(controls.current_speed());
    save_speed(state, controls, speed);
}

/// Validate the speed prompt. Returns true when the prompt may close.
pub fn submit_speed(state: &mut PlayerState, controls: &mut Controls) -> bool {
    match parse_speed(&state.speed_input) {
        Ok(speed) => {
            save_speed(state, controls, speed);
            true
        }
        Err(e) => {
            tracing::debug!("rejected speed input: {}", e);
            state.set_notice(INVALID_SPEED);
            false
        }
    }
}

fn save_speed(state: &mut PlayerState, controls: &mut Controls, speed: f64) {
    let result = store_speed(
        &mut *controls.preferences.borrow_mut(),
        speed,
        controls.speed_ttl,
    );
    match result {
        Ok(()) => state.set_notice(format!("Speed {}x", trim_speed(controls.current_speed()))),
        Err(e) => {
            tracing::warn!("Failed to save speed preference: {}", e);
            state.set_notice(format!("Could not save speed: {}", e));
        }
    }
}

/// `1.25` -> "1.25", `2.0` -> "2"
pub fn trim_speed(speed: f64) -> String {
    let formatted = format!("{:.2}", speed);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_speed_drops_trailing_zeros() {
        assert_eq!(trim_speed(2.0), "2");
        assert_eq!(trim_speed(1.25), "1.25");
        assert_eq!(trim_speed(0.5), "0.5");
        assert_eq!(trim_speed(1.234), "1.23");
    }
}
