//! Input buffer and answer display helpers

use crate::ui::theme::Theme;
use ratatui::text::{Line, Span};

/// Marker drawn at the end of the input buffer
pub const CURSOR: &str = "▌";

/// Prompt before the first input line
pub const INPUT_PROMPT: &str = "> ";

/// Indent for wrapped and hard-broken input lines
pub const CONTINUATION_INDENT: &str = "  ";

/// Wrap the input buffer to `width` columns.
///
/// Line breaks typed by the user are kept as hard breaks. The first line
/// carries the prompt and every following line is indented to match it.
pub fn wrap_input(input: &str, width: usize) -> Vec<String> {
    let body_width = width.saturating_sub(INPUT_PROMPT.len()).max(1);
    let options = textwrap::Options::new(body_width).break_words(true);

    let mut lines = Vec::new();
    for paragraph in input.split('\n') {
        let body = paragraph.trim_end_matches(' ');
        let mut wrapped: Vec<String> = textwrap::wrap(body, &options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }

        // textwrap drops trailing spaces; keep them so the cursor sits after them
        let trailing = paragraph.len() - body.len();
        if let Some(last) = wrapped.last_mut() {
            last.push_str(&" ".repeat(trailing));
        }

        lines.extend(wrapped);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 {
                INPUT_PROMPT
            } else {
                CONTINUATION_INDENT
            };
            format!("{prefix}{line}")
        })
        .collect()
}

/// Styled input lines with the cursor marker after the last character
pub fn input_lines(input: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = wrap_input(input, width)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme.input)))
        .collect();

    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::styled(CURSOR, theme.cursor));
    }

    lines
}

/// Shorten an answer for display, keeping the stored value untouched
pub fn truncate_display(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let kept: String = flat.chars().take(max_chars).collect();
        format!("{kept}...")
    }
}
