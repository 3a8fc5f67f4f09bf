//! Key handling for the chat screen.
//!
//! Keys that only move the cursor, scroll or change focus are applied to the
//! UI state directly. Keys that change conversations come back as
//! [`AppAction`]s so they go through the same path as background results.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction, Focus};

const PAGE_SCROLL_LINES: u16 = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    if key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    if let Some(actions) = handle_global_keys(app, &key) {
        return actions;
    }
    if handle_scroll_keys(app, key.code) {
        return Vec::new();
    }

    match app.ui.focus {
        Focus::Sidebar => handle_sidebar_keys(app, &key),
        Focus::Input => handle_input_keys(app, key),
    }
}

/// Pasted text goes into the prompt verbatim (newlines included).
pub fn handle_paste(app: &mut App, text: &str) {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    app.ui.focus_input();
    app.ui.textarea.insert_str(normalized);
}

fn handle_global_keys(app: &mut App, key: &KeyEvent) -> Option<Vec<AppAction>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.ui.exit_requested = true;
            Some(Vec::new())
        }
        KeyCode::Esc => {
            app.ui.exit_requested = true;
            Some(Vec::new())
        }
        KeyCode::Char('n') if ctrl => Some(vec![AppAction::NewConversation]),
        KeyCode::Char('t') if ctrl => Some(vec![AppAction::ToggleTheme]),
        KeyCode::Char('d') if ctrl => Some(
            app.highlighted_conversation_id()
                .map(|id| AppAction::DeleteConversation { id: id.to_string() })
                .into_iter()
                .collect(),
        ),
        KeyCode::Tab | KeyCode::BackTab => {
            app.ui.toggle_focus();
            Some(Vec::new())
        }
        _ => None,
    }
}

fn handle_scroll_keys(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::PageUp => app.ui.scroll_up(PAGE_SCROLL_LINES),
        KeyCode::PageDown => app.ui.scroll_down(PAGE_SCROLL_LINES),
        _ => return false,
    }
    true
}

fn handle_sidebar_keys(app: &mut App, key: &KeyEvent) -> Vec<AppAction> {
    match key.code {
        KeyCode::Up => app.ui.sidebar_up(),
        KeyCode::Down => app.ui.sidebar_down(app.store.conversations().len()),
        KeyCode::Enter => {
            if let Some(id) = app.highlighted_conversation_id().map(str::to_string) {
                app.ui.focus_input();
                return vec![AppAction::SelectConversation { id }];
            }
        }
        _ => {}
    }
    Vec::new()
}

fn handle_input_keys(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    let newline = key
        .modifiers
        .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Enter if newline => {
            app.ui.textarea.insert_newline();
            Vec::new()
        }
        KeyCode::Enter => submit_input(app),
        KeyCode::Up => {
            app.ui.scroll_up(1);
            Vec::new()
        }
        KeyCode::Down => {
            app.ui.scroll_down(1);
            Vec::new()
        }
        _ => {
            app.ui.textarea.input(TAInput::from(key));
            Vec::new()
        }
    }
}

/// The prompt keeps its text when the submission will be rejected, so
/// nothing typed is lost while a reply is still arriving.
fn submit_input(app: &mut App) -> Vec<AppAction> {
    let text = app.ui.input_text();
    if text.trim().is_empty() {
        return Vec::new();
    }
    if !app.session.is_generating {
        app.ui.take_input();
    }
    vec![AppAction::SubmitMessage { text }]
}
