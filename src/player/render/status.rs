//! Status bar and key-hint footer.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::PlayerView;
use crate::player::input::trim_speed;
use crate::player::playback::TransportPhase;
use crate::player::state::Mode;
use crate::theme::{current_theme, Theme};

/// Shown while the active cue is scrolled out of view.
pub const JUMP_HINT: &str = "current cue off screen (c: jump back)";

const SEPARATOR: &str = " | ";

/// Compose the status bar text: play state, position, speed, cue n/N and
/// then the jump hint or the latest notice.
pub fn status_text(view: &PlayerView) -> String {
    let snapshot = &view.snapshot;
    let state = match snapshot.phase {
        TransportPhase::Playing => "Playing",
        TransportPhase::Paused if view.state.ended => "Ended",
        TransportPhase::Paused => "Paused",
        TransportPhase::Idle => "Idle",
    };
    let cue = match snapshot.index {
        Some(index) => format!("cue {}/{}", index + 1, snapshot.cue_count),
        None => "no cues".to_string(),
    };

    let mut parts = vec![
        state.to_string(),
        snapshot.timestamp.clone(),
        format!("{}x", trim_speed(view.speed)),
        cue,
    ];
    if view.state.jump_hint {
        parts.push(JUMP_HINT.to_string());
    }
    // The speed prompt shows its own notice inside the modal
    if view.state.mode != Mode::SpeedPrompt {
        if let Some(notice) = &view.state.notice {
            parts.push(notice.clone());
        }
    }
    parts.join(SEPARATOR)
}

/// Key hints for the footer in each mode.
pub fn footer_keys(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Normal => &[
            ("space", "play/pause"),
            ("enter", "play here"),
            ("+/-", "speed"),
            ("c", "current"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Mode::Help => &[("any key", "close")],
        Mode::SpeedPrompt => &[("enter", "apply"), ("esc", "cancel")],
        Mode::ConfirmLeave => &[("y", "leave"), ("any key", "stay")],
    }
}

/// Render a status line with the given text.
pub fn render_status_line(frame: &mut Frame, area: Rect, text: &str) {
    let theme = current_theme();
    let status = Paragraph::new(format!(" {}", text)).style(Style::default().fg(theme.text_primary));
    frame.render_widget(status, area);
}

/// Render a centered footer with keybinding hints.
///
/// Takes pairs of (key, description) and joins them with " | " separators.
/// Example: `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let theme = current_theme();
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, &theme)))
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Build styled spans for footer keybinding hints.
///
/// Each key is highlighted with the theme accent color, descriptions use
/// the secondary text color.
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}
