use ratatui::style::{Color, Modifier, Style};

use crate::core::preferences::ThemeMode;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,
    pub loading_style: Style,
    pub error_style: Style,
    pub welcome_style: Style,

    // Sidebar
    pub sidebar_item_style: Style,
    pub sidebar_active_style: Style,
    pub sidebar_highlight_style: Style,

    // Chrome
    pub border_style: Style,
    pub focused_border_style: Style,
    pub title_style: Style,
    pub status_style: Style,
    pub hint_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),
            loading_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            error_style: Style::default().fg(Color::LightRed),
            welcome_style: Style::default().fg(Color::Gray),

            sidebar_item_style: Style::default().fg(Color::Gray),
            sidebar_active_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            sidebar_highlight_style: Style::default().bg(Color::DarkGray),

            border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Cyan),
            title_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::Yellow),
            hint_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            bot_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Black),
            loading_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            error_style: Style::default().fg(Color::Red),
            welcome_style: Style::default().fg(Color::DarkGray),

            sidebar_item_style: Style::default().fg(Color::DarkGray),
            sidebar_active_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            sidebar_highlight_style: Style::default().bg(Color::Gray),

            border_style: Style::default().fg(Color::Gray),
            focused_border_style: Style::default().fg(Color::Blue),
            title_style: Style::default().fg(Color::DarkGray),
            status_style: Style::default().fg(Color::Red),
            hint_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}
