//! Frame rendering.
//!
//! [`ui`] is a pure function of `&App`; the only thing it writes back is the
//! transcript's scroll range, which depends on the terminal size and is
//! needed to clamp scrolling between frames.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::app::{App, Focus};
use crate::core::conversation::Conversation;
use crate::core::message::Message;
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::theme::Theme;

const SIDEBAR_WIDTH: u16 = 30;
const MAX_INPUT_LINES: u16 = 6;
const MESSAGE_INDENT: &str = "  ";
const KEY_HINTS: &str =
    "Enter send · Alt+Enter newline · Tab sidebar · Ctrl+N new · Ctrl+D delete · Ctrl+T theme · Esc quit";

pub fn ui(f: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.theme);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(f.area());

    let input_lines = (app.ui.textarea.lines().len() as u16).clamp(1, MAX_INPUT_LINES);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(input_lines + 2), // +2 for borders
            Constraint::Length(1),
        ])
        .split(columns[1]);

    render_sidebar(f, app, &theme, columns[0]);
    render_transcript(f, app, &theme, rows[0]);
    render_input(f, app, &theme, rows[1]);
    render_footer(f, app, &theme, rows[2]);
}

fn border_style(app: &App, theme: &Theme, focus: Focus) -> Style {
    if app.ui.focus == focus {
        theme.focused_border_style
    } else {
        theme.border_style
    }
}

fn render_sidebar(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let active_id = app.store.active_id();
    let items: Vec<ListItem> = app
        .store
        .conversations()
        .iter()
        .map(|conversation| {
            let is_active = conversation.id == active_id;
            let marker = if is_active { "● " } else { "  " };
            let style = if is_active {
                theme.sidebar_active_style
            } else {
                theme.sidebar_item_style
            };
            ListItem::new(Line::from(Span::styled(
                format!("{marker}{}", display_title(conversation)),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app, theme, Focus::Sidebar))
                .title(Span::styled("Chats", theme.title_style)),
        )
        .highlight_style(theme.sidebar_highlight_style);

    let mut state = ListState::default().with_selected(Some(app.ui.sidebar_index));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_transcript(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let conversation = app.store.active();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style)
        .title(Span::styled(display_title(conversation), theme.title_style));
    let inner = block.inner(area);

    let lines = build_transcript_lines(conversation, theme, inner.width as usize);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(inner.height);
    app.ui.max_scroll.set(max_scroll);
    let offset = max_scroll - app.ui.scroll_from_bottom.min(max_scroll);

    f.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
}

/// Titles come from raw user input and may hold line breaks.
fn display_title(conversation: &Conversation) -> String {
    conversation.title.replace(['\n', '\r', '\t'], " ")
}

/// Transcript lines for `conversation`, pre-wrapped to `width` columns.
pub fn build_transcript_lines(
    conversation: &Conversation,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    if conversation.is_empty() {
        return welcome_lines(theme);
    }

    let wrap = WrapConfig::new(width.saturating_sub(MESSAGE_INDENT.len()));
    let mut lines = Vec::new();
    for message in &conversation.messages {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(message_header(message, theme));

        let body_style = if message.error {
            theme.error_style
        } else if message.loading {
            theme.loading_style
        } else if message.is_user() {
            theme.user_text_style
        } else {
            theme.bot_text_style
        };
        for text in TextWrapper::wrap_lines(&message.content, &wrap) {
            lines.push(Line::from(vec![
                Span::raw(MESSAGE_INDENT),
                Span::styled(text, body_style),
            ]));
        }
    }
    lines
}

fn message_header(message: &Message, theme: &Theme) -> Line<'static> {
    if message.is_user() {
        return Line::from(Span::styled("You", theme.user_prefix_style));
    }
    let mut spans = vec![Span::styled("Agent", theme.bot_prefix_style)];
    if message.error {
        spans.push(Span::styled(" (failed)", theme.error_style));
    } else if message.loading {
        spans.push(Span::styled(" (typing)", theme.loading_style));
    }
    Line::from(spans)
}

fn welcome_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from(Span::styled("  Start a conversation", theme.bot_prefix_style)),
        Line::default(),
        Line::from(Span::styled(
            "  Type a message below and press Enter to send it.",
            theme.welcome_style,
        )),
        Line::from(Span::styled(
            "  Ctrl+N opens a new chat; Tab moves to the chat list.",
            theme.welcome_style,
        )),
    ]
}

fn render_input(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = if app.session.is_generating {
        "Waiting for the agent..."
    } else {
        "Message"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, theme, Focus::Input))
        .title(Span::styled(title, theme.title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(&app.ui.textarea, inner);
}

fn render_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let line = match app.ui.status.as_deref() {
        Some(status) => Line::from(Span::styled(format!(" {status}"), theme.status_style)),
        None => Line::from(Span::styled(format!(" {KEY_HINTS}"), theme.hint_style)),
    };
    f.render_widget(Paragraph::new(line), area);
}
