//! Input handling for the terminal player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod actions;
mod keyboard;
mod mouse;

pub use actions::{trim_speed, Controls, INVALID_SPEED};
pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;

use crate::player::state::{InputResult, PlayerState};

/// Handle any input event, dispatching to the appropriate handler.
pub fn handle_event(event: Event, state: &mut PlayerState, controls: &mut Controls) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, state, controls),
        Event::Mouse(mouse) => handle_mouse_event(mouse, state, controls),
        Event::Resize(_, rows) => {
            state.handle_resize(rows);
            state.refresh_jump_hint(controls.engine.current_index());
            InputResult::Continue
        }
        _ => InputResult::Continue, // Ignore focus events, paste, etc.
    }
}
