//! Cue list rendering.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::PlayerView;
use crate::subtitle::{format_hms, Cue};
use crate::theme::{current_theme, Theme};

/// Marker drawn in front of the active cue.
const CURRENT_MARKER: &str = "▶ ";
const BLANK_MARKER: &str = "  ";
/// Gap between the start time and the text.
const GAP: &str = "  ";

/// Render the visible slice of the cue list.
pub fn render_cue_list(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let theme = current_theme();
    let state = view.state;
    let lines: Vec<Line> = view
        .cues
        .iter()
        .enumerate()
        .skip(state.offset)
        .take(area.height as usize)
        .map(|(index, cue)| {
            cue_line(
                cue,
                area.width as usize,
                view.snapshot.index == Some(index),
                state.cursor == index,
                &theme,
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// One row: marker, start time, text truncated to `width` columns.
pub fn cue_line(
    cue: &Cue,
    width: usize,
    current: bool,
    selected: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if current { CURRENT_MARKER } else { BLANK_MARKER };
    let timestamp = format_hms(cue.start_seconds);
    let used = marker.chars().count() + timestamp.len() + GAP.len();
    let text = truncate_to_width(&cue.display_text(), width.saturating_sub(used));

    let (time_style, text_style) = if current {
        (theme.accent_style(), theme.accent_bold_style())
    } else {
        (theme.text_secondary_style(), theme.text_style())
    };
    let row_style = if selected {
        theme.cursor_style()
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(marker, text_style),
        Span::styled(timestamp, time_style),
        Span::raw(GAP),
        Span::styled(text, text_style),
    ])
    .style(row_style)
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        // Leave one column for the ellipsis
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
