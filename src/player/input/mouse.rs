//! Mouse input handling for the terminal player.
//!
//! Left click on a cue row seeks there and starts playback; the wheel
//! scrolls the list.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::actions::{self, Controls};
use crate::player::state::{InputResult, Mode, PlayerState};

/// Rows moved per wheel notch.
const WHEEL_STEP: isize = 3;

/// Handle a mouse event.
pub fn handle_mouse_event(
    mouse: MouseEvent,
    state: &mut PlayerState,
    controls: &mut Controls,
) -> InputResult {
    if state.mode != Mode::Normal {
        return InputResult::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = row_to_cue(state, mouse.row) {
                actions::seek_and_play(state, controls, index);
            }
        }
        MouseEventKind::ScrollDown => {
            state.scroll_by(WHEEL_STEP, controls.engine.current_index());
        }
        MouseEventKind::ScrollUp => {
            state.scroll_by(-WHEEL_STEP, controls.engine.current_index());
        }
        _ => {}
    }

    InputResult::Continue
}

/// Map a screen row to the cue drawn there.
fn row_to_cue(state: &PlayerState, row: u16) -> Option<usize> {
    let list_row = row.checked_sub(PlayerState::LIST_TOP)? as usize;
    if list_row >= state.view_rows {
        return None;
    }
    let index = state.offset + list_row;
    (index < state.cue_count).then_some(index)
}
