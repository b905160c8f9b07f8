//! Modal overlays: help, speed prompt and the leave confirmation.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::{current_theme, Theme};

/// Key bindings listed in the help modal, grouped by section.
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "Play / pause"),
            ("Enter", "Seek to cue and play"),
            ("Click", "Seek to clicked cue and play"),
            ("+ / -", "Speed up / down"),
            ("s", "Enter a speed factor"),
        ],
    ),
    (
        "Navigation",
        &[
            ("j / Down", "Next cue"),
            ("k / Up", "Previous cue"),
            ("PgUp/PgDn", "Page up / down"),
            ("Home/End", "First / last cue"),
            ("Wheel", "Scroll the list"),
            ("c", "Jump back to current cue"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q / Esc", "Leave (asks first)"),
            ("Ctrl+C", "Quit immediately"),
        ],
    ),
];

/// Center a `width` x `height` box inside `area`, shrunk to fit.
pub fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn modal_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(format!(" {} ", title))
}

fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (section, keys) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(
            section.to_string(),
            theme.accent_bold_style(),
        )));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<11}", key), theme.accent_style()),
                Span::styled(desc.to_string(), theme.text_style()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.text_secondary_style(),
    )));
    lines
}

/// Render the help modal overlay.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let theme = current_theme();
    let modal = modal_area(area, 50, 24);
    frame.render_widget(Clear, modal);

    let help = Paragraph::new(build_help_text(&theme))
        .block(modal_block("Help", &theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(help, modal);
}

/// Render the speed prompt with the text typed so far and any rejection
/// message below it.
pub fn render_speed_prompt(frame: &mut Frame, area: Rect, input: &str, notice: Option<&str>) {
    let theme = current_theme();
    let modal = modal_area(area, 40, 6);
    frame.render_widget(Clear, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            "Change playback speed factor",
            theme.text_style(),
        )),
        Line::from(vec![
            Span::styled("> ", theme.accent_style()),
            Span::styled(input.to_string(), theme.accent_bold_style()),
            Span::styled("_", theme.text_secondary_style()),
        ]),
    ];
    if let Some(notice) = notice {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            theme.error_style(),
        )));
    }

    let prompt = Paragraph::new(lines).block(modal_block("Speed", &theme));
    frame.render_widget(prompt, modal);
}

/// Render the leave confirmation.
pub fn render_confirm_leave(frame: &mut Frame, area: Rect) {
    let theme = current_theme();
    let modal = modal_area(area, 30, 3);
    frame.render_widget(Clear, modal);

    let confirm = Paragraph::new(Line::from(Span::styled(
        "Leave? (y/N)",
        theme.accent_bold_style(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error_style()),
    );
    frame.render_widget(confirm, modal);
}
