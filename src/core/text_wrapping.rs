//! Word wrapping for the transcript.
//!
//! The renderer wraps text itself and hands ratatui pre-broken lines, so the
//! number of visual lines (and therefore the scroll range) is known exactly.
//! Widths are display columns, not bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy)]
pub struct WrapConfig {
    /// Maximum display width of a line; treated as 1 when zero.
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

pub struct TextWrapper;

impl TextWrapper {
    /// Wraps `text` at word boundaries. Explicit newlines are kept, runs of
    /// spaces inside a line are kept, and words wider than the line are
    /// split wherever they hit the edge.
    pub fn wrap_lines(text: &str, config: &WrapConfig) -> Vec<String> {
        let width = config.width.max(1);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            wrap_paragraph(paragraph, width, &mut lines);
        }
        lines
    }

    pub fn count_wrapped_lines(text: &str, config: &WrapConfig) -> usize {
        Self::wrap_lines(text, config).len()
    }
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let first_line = out.len();
    let mut line = String::new();
    let mut line_width = 0usize;

    for token in split_keep_spaces(paragraph) {
        let token_width = token.width();

        if line_width + token_width <= width {
            line.push_str(token);
            line_width += token_width;
            continue;
        }

        // Whitespace at a break point is swallowed.
        if token.starts_with(' ') {
            flush(&mut line, &mut line_width, out);
            continue;
        }
        if line_width > 0 {
            flush(&mut line, &mut line_width, out);
        }
        if token_width <= width {
            line.push_str(token);
            line_width = token_width;
            continue;
        }

        for ch in token.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && line_width > 0 {
                flush(&mut line, &mut line_width, out);
            }
            line.push(ch);
            line_width += ch_width;
        }
    }

    if !line.is_empty() || out.len() == first_line {
        out.push(line);
    }
}

fn flush(line: &mut String, line_width: &mut usize, out: &mut Vec<String>) {
    let taken = std::mem::take(line);
    out.push(taken.trim_end_matches(' ').to_string());
    *line_width = 0;
}

/// Splits into alternating runs of spaces and non-space text.
fn split_keep_spaces(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let space = ch == ' ';
        match in_space {
            Some(current) if current != space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
