use std::cell::Cell;
use std::time::Instant;

use ratatui::style::Style;
use tui_textarea::TextArea;

pub const INPUT_PLACEHOLDER: &str = "Message the agent...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Sidebar,
}

pub struct UiState {
    pub textarea: TextArea<'static>,
    pub focus: Focus,
    /// Highlighted row in the conversation list.
    pub sidebar_index: usize,
    /// Transcript lines scrolled up from the bottom; 0 follows new output.
    pub scroll_from_bottom: u16,
    /// Largest useful `scroll_from_bottom`, refreshed on every render.
    pub max_scroll: Cell<u16>,
    pub status: Option<String>,
    pub status_set_at: Option<Instant>,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            textarea: new_textarea(),
            focus: Focus::Input,
            sidebar_index: 0,
            scroll_from_bottom: 0,
            max_scroll: Cell::new(0),
            status: None,
            status_set_at: None,
            exit_requested: false,
        }
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Returns the typed text and leaves an empty prompt behind.
    pub fn take_input(&mut self) -> String {
        let text = self.input_text();
        self.textarea = new_textarea();
        text
    }

    pub fn is_input_focused(&self) -> bool {
        self.focus == Focus::Input
    }

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Sidebar,
            Focus::Sidebar => Focus::Input,
        };
    }

    pub fn sidebar_up(&mut self) {
        self.sidebar_index = self.sidebar_index.saturating_sub(1);
    }

    pub fn sidebar_down(&mut self, len: usize) {
        if len == 0 {
            self.sidebar_index = 0;
        } else {
            self.sidebar_index = (self.sidebar_index + 1).min(len - 1);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self
            .scroll_from_bottom
            .saturating_add(lines)
            .min(self.max_scroll.get());
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = Some(status.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea
}
