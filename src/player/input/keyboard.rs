//! Keyboard input handling for the terminal player.
//!
//! Handles all keyboard shortcuts including playback controls,
//! list navigation, the speed prompt and the leave confirmation.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::{self, Controls};
use crate::player::state::{InputResult, Mode, PlayerState};

/// Handle a keyboard event.
///
/// This is the main keyboard input handler that processes all key events
/// and updates state or returns control flow signals.
pub fn handle_key_event(
    key: KeyEvent,
    state: &mut PlayerState,
    controls: &mut Controls,
) -> InputResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return InputResult::Interrupt;
    }

    match state.mode {
        Mode::Help => {
            // Any key closes help
            state.set_mode(Mode::Normal);
            InputResult::Continue
        }
        Mode::ConfirmLeave => handle_confirm_leave_key(key, state),
        Mode::SpeedPrompt => {
            handle_speed_prompt_key(key, state, controls);
            InputResult::Continue
        }
        Mode::Normal => handle_normal_key(key, state, controls),
    }
}

fn handle_normal_key(key: KeyEvent, state: &mut PlayerState, controls: &mut Controls) -> InputResult {
    match key.code {
        // === Leave ===
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.ended {
                return InputResult::Quit;
            }
            state.set_mode(Mode::ConfirmLeave);
        }

        // === Playback controls ===
        KeyCode::Char(' ') => actions::toggle_playback(state, controls),
        KeyCode::Enter => {
            let index = state.cursor;
            actions::seek_and_play(state, controls, index);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => actions::faster(state, controls),
        KeyCode::Char('-') | KeyCode::Char('_') => actions::slower(state, controls),
        KeyCode::Char('s') => state.open_speed_prompt(controls.current_speed()),

        // === Navigation ===
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(-1),
        KeyCode::PageDown => state.page_down(),
        KeyCode::PageUp => state.page_up(),
        KeyCode::Home | KeyCode::Char('g') => state.cursor_home(),
        KeyCode::End | KeyCode::Char('G') => state.cursor_end(),
        KeyCode::Char('c') => actions::jump_to_current(state, controls),

        KeyCode::Char('?') => state.set_mode(Mode::Help),

        _ => {}
    }

    if matches!(
        key.code,
        KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Char('g')
            | KeyCode::Char('G')
    ) {
        state.refresh_jump_hint(controls.engine.current_index());
    }
    InputResult::Continue
}

fn handle_confirm_leave_key(key: KeyEvent, state: &mut PlayerState) -> InputResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => InputResult::Quit,
        _ => {
            state.set_mode(Mode::Normal);
            InputResult::Continue
        }
    }
}

fn handle_speed_prompt_key(key: KeyEvent, state: &mut PlayerState, controls: &mut Controls) {
    match key.code {
        KeyCode::Esc => {
            state.speed_input.clear();
            state.clear_notice();
            state.set_mode(Mode::Normal);
        }
        KeyCode::Enter => {
            if actions::submit_speed(state, controls) {
                state.speed_input.clear();
                state.set_mode(Mode::Normal);
            }
        }
        KeyCode::Backspace => {
            state.speed_input.pop();
            state.needs_render = true;
        }
        KeyCode::Char(c) if !c.is_control() => {
            state.speed_input.push(c);
            state.needs_render = true;
        }
        _ => {}
    }
}
