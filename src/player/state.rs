//! Player state management
//!
//! Contains the `PlayerState` struct that holds everything the terminal
//! player shows besides the engine itself: the browse cursor, the scroll
//! offset of the cue list, the active modal, and transient notices.

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running
    Continue,
    /// Leave the player (confirmed, or nothing left to play)
    Quit,
    /// Ctrl+C
    Interrupt,
}

/// Which overlay, if any, owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Help modal; any key closes it
    Help,
    /// Editing the speed factor
    SpeedPrompt,
    /// "Leave? (y/N)"
    ConfirmLeave,
}

/// Central UI state for the terminal player.
#[derive(Debug)]
pub struct PlayerState {
    /// Source name shown in the title line
    pub title: String,
    pub mode: Mode,

    // === Cue list view ===
    /// Number of cues in the list
    pub cue_count: usize,
    /// Browse cursor (row the user has selected)
    pub cursor: usize,
    /// First visible cue
    pub offset: usize,
    /// Number of visible cue rows
    pub view_rows: usize,
    /// Current cue scrolled out of view; status bar offers `c` to jump back
    pub jump_hint: bool,

    // === Status ===
    /// One-shot message for the status bar
    pub notice: Option<String>,
    /// Text typed into the speed prompt
    pub speed_input: String,
    /// Playback stopped on the final cue
    pub ended: bool,

    // === Rendering flags ===
    /// True when screen needs to be redrawn
    pub needs_render: bool,
}

impl PlayerState {
    /// Rows taken by the title line, status bar and footer.
    pub const CHROME_LINES: u16 = 3;

    /// Row where the cue list starts (below the title line).
    pub const LIST_TOP: u16 = 1;

    pub fn new(title: impl Into<String>, cue_count: usize, term_rows: u16) -> Self {
        Self {
            title: title.into(),
            mode: Mode::Normal,
            cue_count,
            cursor: 0,
            offset: 0,
            view_rows: view_rows_for(term_rows),
            jump_hint: false,
            notice: None,
            speed_input: String::new(),
            ended: false,
            needs_render: true,
        }
    }

    /// Handle terminal resize: recompute the list height and keep the
    /// cursor on screen.
    pub fn handle_resize(&mut self, term_rows: u16) {
        self.view_rows = view_rows_for(term_rows);
        self.offset = self.offset.min(self.max_offset());
        self.keep_cursor_visible();
        self.needs_render = true;
    }

    /// Whether cue `index` is inside the visible rows.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.view_rows
    }

    fn max_offset(&self) -> usize {
        self.cue_count.saturating_sub(self.view_rows)
    }

    // === Browse cursor ===

    /// Move the cursor by `delta` rows, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.cue_count == 0 {
            return;
        }
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = target.min(self.cue_count - 1);
        self.keep_cursor_visible();
        self.needs_render = true;
    }

    pub fn page_down(&mut self) {
        self.move_cursor(self.page_step());
    }

    pub fn page_up(&mut self) {
        self.move_cursor(-self.page_step());
    }

    pub fn cursor_home(&mut self) {
        self.move_cursor(isize::MIN);
    }

    pub fn cursor_end(&mut self) {
        self.move_cursor(isize::MAX);
    }

    fn page_step(&self) -> isize {
        self.view_rows.max(1) as isize
    }

    fn keep_cursor_visible(&mut self) {
        if self.view_rows == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.view_rows {
            self.offset = self.cursor + 1 - self.view_rows;
        }
    }

    // === Scrolling ===

    /// Scroll the view without moving the cursor (mouse wheel).
    pub fn scroll_by(&mut self, delta: isize, current: Option<usize>) {
        self.offset = self.offset.saturating_add_signed(delta).min(self.max_offset());
        self.refresh_jump_hint(current);
        self.needs_render = true;
    }

    /// Put `index` in the middle of the view and select it.
    pub fn center_on(&mut self, index: usize) {
        self.cursor = index.min(self.cue_count.saturating_sub(1));
        self.offset = self
            .cursor
            .saturating_sub(self.view_rows / 2)
            .min(self.max_offset());
        self.jump_hint = false;
        self.needs_render = true;
    }

    /// The active cue moved from `previous` to `current`.
    ///
    /// The view follows only if the user was looking at the previous cue;
    /// otherwise it stays where the user scrolled and the jump hint is shown.
    pub fn follow_cue(&mut self, previous: Option<usize>, current: usize) {
        let following = previous.map_or(true, |index| self.is_visible(index));
        if following {
            self.center_on(current);
        } else {
            self.refresh_jump_hint(Some(current));
        }
        self.needs_render = true;
    }

    /// Show the jump hint exactly when the current cue is off screen.
    pub fn refresh_jump_hint(&mut self, current: Option<usize>) {
        self.jump_hint = current.is_some_and(|index| !self.is_visible(index));
    }

    // === Notices and modes ===

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.needs_render = true;
    }

    pub fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.needs_render = true;
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.needs_render = true;
    }

    /// Open the speed prompt pre-filled with `speed`.
    pub fn open_speed_prompt(&mut self, speed: f64) {
        self.speed_input = format!("{}", speed);
        self.notice = None;
        self.set_mode(Mode::SpeedPrompt);
    }
}

fn view_rows_for(term_rows: u16) -> usize {
    term_rows.saturating_sub(PlayerState::CHROME_LINES) as usize
}
