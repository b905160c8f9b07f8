//! Rendering components for the terminal player.
//!
//! Draws the title line, the cue list, the status bar, the key-hint footer
//! and whichever modal is open, all as ratatui widgets.

mod cues;
mod help;
mod status;

pub use cues::{cue_line, render_cue_list, truncate_to_width};
pub use help::{modal_area, render_confirm_leave, render_help, render_speed_prompt};
pub use status::{footer_keys, render_footer, render_status_line, status_text};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::player::playback::EngineSnapshot;
use crate::player::state::{Mode, PlayerState};
use crate::subtitle::Cue;
use crate::theme::current_theme;

/// Everything one frame needs, borrowed from the run loop.
pub struct PlayerView<'a> {
    pub state: &'a PlayerState,
    pub cues: &'a [Cue],
    pub snapshot: EngineSnapshot,
    /// Speed the next tick will use (may differ from the snapshot while paused)
    pub speed: f64,
}

/// Split the screen into title, cue list, status bar and footer.
pub fn player_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Draw a full frame.
pub fn draw(frame: &mut Frame, view: &PlayerView) {
    let area = frame.area();
    let [title, list, status, footer] = player_layout(area);

    render_title(frame, title, view);
    render_cue_list(frame, list, view);
    render_status_line(frame, status, &status_text(view));
    render_footer(frame, footer, footer_keys(view.state.mode));

    match view.state.mode {
        Mode::Help => render_help(frame, area),
        Mode::SpeedPrompt => render_speed_prompt(
            frame,
            area,
            &view.state.speed_input,
            view.state.notice.as_deref(),
        ),
        Mode::ConfirmLeave => render_confirm_leave(frame, area),
        Mode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let theme = current_theme();
    let line = Line::from(vec![
        Span::styled(format!(" {}", view.state.title), theme.accent_bold_style()),
        Span::styled(
            format!("  ({} cues)", view.cues.len()),
            theme.text_secondary_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
