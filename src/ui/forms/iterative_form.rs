//! Iterative form rendering
//!
//! `form_lines` turns the form state into styled text without touching the
//! terminal; `draw` places that text on a frame.

use super::field_renderer::{input_lines, truncate_display, CURSOR};
use crate::state::{FormPhase, IterativeForm, Outcome};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Columns taken by the border and padding around the form text
pub const FRAME_OVERHEAD: u16 = 4;

/// Display limit for answers listed under the current question
const ROUND_ANSWER_PREVIEW: usize = 50;

/// Display limit for answers listed under the continuation prompt
const SESSION_ANSWER_PREVIEW: usize = 60;

const SEPARATOR: &str = "─────────────────────────────────";

/// One-line summary for a finished form
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::MoreRequested => "✓ Gathering more information...",
        Outcome::Finished => "✓ Information gathering complete!",
        Outcome::Cancelled => "✗ Cancelled. No information was submitted.",
    }
}

/// Build the full text of the form for its current state
pub fn form_lines(form: &IterativeForm, theme: &Theme) -> Vec<Line<'static>> {
    if let FormPhase::Complete(outcome) = form.phase() {
        let style = match outcome {
            Outcome::Cancelled => theme.cancelled,
            _ => theme.success,
        };
        return vec![Line::from(Span::styled(outcome_message(outcome), style))];
    }

    let mut lines = vec![
        Line::from(Span::styled(form.title().to_string(), theme.title)),
        Line::from(""),
    ];

    let max_rounds = form.config().max_rounds;
    if max_rounds > 1 {
        lines.push(Line::from(Span::styled(
            format!("Round {} of {}", form.current_round() + 1, max_rounds),
            theme.help,
        )));
        lines.push(Line::from(""));
    }

    let width = form.display_width().saturating_sub(FRAME_OVERHEAD) as usize;
    match form.phase() {
        FormPhase::AskingContinuation => push_continuation(&mut lines, form, theme, width),
        _ => push_question(&mut lines, form, theme, width),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", theme.key),
        Span::styled(": submit  ", theme.muted),
        Span::styled("Alt+Enter", theme.key),
        Span::styled(": new line  ", theme.muted),
        Span::styled("Esc", theme.key),
        Span::styled(": cancel", theme.muted),
    ]));

    lines
}

fn push_question(lines: &mut Vec<Line<'static>>, form: &IterativeForm, theme: &Theme, width: usize) {
    let Some(question) = form.current_question() else {
        lines.push(Line::from(Span::styled(
            form.config().round_prompt.clone(),
            theme.help,
        )));
        lines.push(Line::from(Span::styled(
            "Waiting for questions...",
            theme.muted,
        )));
        return;
    };

    if !form.config().round_prompt.is_empty() {
        lines.push(Line::from(Span::styled(
            form.config().round_prompt.clone(),
            theme.help,
        )));
    }
    let (position, total) = form.round_progress();
    lines.push(Line::from(format!(
        "Question {position} of {total} (this round)"
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        question.text.clone(),
        theme.question,
    )));
    if let Some(help) = question.help() {
        lines.push(Line::from(Span::styled(help.to_string(), theme.help)));
    }
    lines.push(Line::from(""));

    lines.extend(input_lines(form.input(), width, theme));
    push_error(lines, form, theme);

    let previous: Vec<(usize, &str)> = form.round_answers().collect();
    if !previous.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(SEPARATOR, theme.muted)));
        lines.push(Line::from("Previous answers (this round):"));
        for (i, answer) in previous {
            lines.push(Line::from(format!(
                "{}. {}",
                i + 1,
                truncate_display(answer, ROUND_ANSWER_PREVIEW)
            )));
        }
    }
}

fn push_continuation(
    lines: &mut Vec<Line<'static>>,
    form: &IterativeForm,
    theme: &Theme,
    width: usize,
) {
    lines.push(Line::from(Span::styled(
        form.config().continuation_prompt.clone(),
        theme.question,
    )));
    lines.push(Line::from(Span::styled("(yes/no)", theme.help)));
    lines.push(Line::from(""));

    lines.extend(input_lines(form.input(), width, theme));
    push_error(lines, form, theme);

    if form.response_count() > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(SEPARATOR, theme.muted)));
        lines.push(Line::from("Information gathered:"));
        for (i, answer) in form.responses().iter().enumerate() {
            lines.push(Line::from(format!(
                "{}. {}",
                i + 1,
                truncate_display(answer, SESSION_ANSWER_PREVIEW)
            )));
        }
    }
}

fn push_error(lines: &mut Vec<Line<'static>>, form: &IterativeForm, theme: &Theme) {
    if let Some(error) = form.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("⚠ {error}"), theme.error)));
    }
}

/// Draw the form into `area`
pub fn draw(frame: &mut Frame, area: Rect, form: &IterativeForm, theme: &Theme) {
    let lines = form_lines(form, theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    let scroll = scroll_offset(&lines, inner.width, inner.height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Rows `lines` take once wrapped to `width` columns
fn wrapped_rows(lines: &[Line<'static>], width: u16) -> u16 {
    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1));
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Scroll so the bottom of the text shows, without pushing the cursor row off the top
fn scroll_offset(lines: &[Line<'static>], width: u16, height: u16) -> u16 {
    let overflow = wrapped_rows(lines, width).saturating_sub(height);
    let cursor_line = lines
        .iter()
        .position(|line| line.spans.last().is_some_and(|span| span.content == CURSOR));

    match cursor_line {
        Some(index) => {
            let cursor_row = wrapped_rows(&lines[..=index], width).saturating_sub(1);
            overflow.min(cursor_row)
        }
        None => overflow,
    }
}

/// Flatten rendered lines to plain text, one line per row
#[cfg(test)]
pub fn lines_to_string(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormConfig, FormEvent, Question};
    use ratatui::{backend::TestBackend, Terminal};

    fn form(max_rounds: usize, questions: Vec<Question>) -> IterativeForm {
        let mut form = IterativeForm::new(
            "Presentation Creation",
            FormConfig {
                max_rounds,
                round_prompt: "Gathering presentation context...".to_string(),
                continuation_prompt: "Do you want to provide more context?".to_string(),
            },
        )
        .unwrap();
        form.add_questions(questions).unwrap();
        form
    }

    fn answer(form: &mut IterativeForm, text: &str) {
        for c in text.chars() {
            form.handle_event(FormEvent::Char(c));
        }
        form.handle_event(FormEvent::Submit);
    }

    fn text(form: &IterativeForm) -> String {
        lines_to_string(&form_lines(form, &Theme::default()))
    }

    #[test]
    fn test_question_view() {
        let form = form(
            2,
            vec![
                Question::with_help("Who is the audience?", "Team, customers, ...", 0),
                Question::new("How long is the talk?", 0),
            ],
        );
        let out = text(&form);
        assert!(out.starts_with("Presentation Creation"));
        assert!(out.contains("Round 1 of 2"));
        assert!(out.contains("Gathering presentation context..."));
        assert!(out.contains("Question 1 of 2 (this round)"));
        assert!(out.contains("Who is the audience?"));
        assert!(out.contains("Team, customers, ..."));
        assert!(out.contains("> ▌"));
        assert!(out.contains("Esc: cancel"));
        assert!(!out.contains("Previous answers"));
    }

    #[test]
    fn test_single_round_hides_indicator() {
        let form = form(1, vec![Question::new("Topic?", 0)]);
        assert!(!text(&form).contains("Round 1 of 1"));
    }

    #[test]
    fn test_error_shown() {
        let mut form = form(1, vec![Question::new("Topic?", 0)]);
        form.handle_event(FormEvent::Submit);
        assert!(text(&form).contains("⚠ Answer required"));
    }

    #[test]
    fn test_scrollback_limited_to_round() {
        let mut form = form(2, vec![Question::new("A?", 0)]);
        answer(&mut form, "round zero answer");
        answer(&mut form, "yes");
        form.add_questions(vec![Question::new("B?", 1), Question::new("C?", 1)])
            .unwrap();
        form.advance_round().unwrap();
        answer(&mut form, "round one answer");

        let out = text(&form);
        assert!(out.contains("Round 2 of 2"));
        assert!(out.contains("Question 2 of 2 (this round)"));
        assert!(out.contains("Previous answers (this round):"));
        assert!(out.contains("1. round one answer"));
        assert!(!out.contains("round zero answer"));
    }

    #[test]
    fn test_scrollback_truncates_display_only() {
        let mut form = form(1, vec![Question::new("A?", 0), Question::new("B?", 0)]);
        let long = "a".repeat(80);
        answer(&mut form, &long);
        let out = text(&form);
        assert!(out.contains(&format!("1. {}...", "a".repeat(50))));
        assert_eq!(form.responses()[0], long);
    }

    #[test]
    fn test_continuation_view_lists_session_answers() {
        let mut form = form(3, vec![Question::new("A?", 0)]);
        answer(&mut form, "first");
        answer(&mut form, "yes");
        form.add_questions(vec![Question::new("B?", 1)]).unwrap();
        form.advance_round().unwrap();
        answer(&mut form, "second");

        let out = text(&form);
        assert!(out.contains("Do you want to provide more context?"));
        assert!(out.contains("(yes/no)"));
        assert!(out.contains("Information gathered:"));
        assert!(out.contains("1. first"));
        assert!(out.contains("2. second"));
    }

    #[test]
    fn test_continuation_error() {
        let mut form = form(2, vec![Question::new("A?", 0)]);
        answer(&mut form, "x");
        answer(&mut form, "perhaps");
        assert!(text(&form).contains("⚠ Please answer yes or no"));
    }

    #[test]
    fn test_three_outcomes_distinct() {
        let mut more = form(2, vec![Question::new("A?", 0)]);
        answer(&mut more, "x");
        answer(&mut more, "y");

        let mut finished = form(2, vec![Question::new("A?", 0)]);
        answer(&mut finished, "x");
        answer(&mut finished, "n");

        let mut cancelled = form(2, vec![Question::new("A?", 0)]);
        cancelled.handle_event(FormEvent::Cancel);

        let outputs = [text(&more), text(&finished), text(&cancelled)];
        assert_eq!(outputs[0], outcome_message(Outcome::MoreRequested));
        assert_eq!(outputs[1], outcome_message(Outcome::Finished));
        assert_eq!(outputs[2], outcome_message(Outcome::Cancelled));
        assert_ne!(outputs[0], outputs[1]);
        assert_ne!(outputs[1], outputs[2]);
        assert_ne!(outputs[0], outputs[2]);
        for out in &outputs {
            assert_eq!(out.lines().count(), 1);
        }
    }

    #[test]
    fn test_input_rewraps_after_resize() {
        let mut form = form(1, vec![Question::new("A?", 0)]);
        for c in "alpha beta gamma delta".chars() {
            form.handle_event(FormEvent::Char(c));
        }
        let wide = form_lines(&form, &Theme::default()).len();
        form.handle_event(FormEvent::Resize(16));
        let narrow = form_lines(&form, &Theme::default()).len();
        assert!(narrow > wide);
        assert!(text(&form).contains("▌"));
    }

    #[test]
    fn test_waiting_view_before_questions() {
        let form = IterativeForm::new("Form", FormConfig::default()).unwrap();
        assert!(text(&form).contains("Waiting for questions..."));
    }

    #[test]
    fn test_draw_to_test_backend() {
        let form = form(2, vec![Question::new("Who is the audience?", 0)]);
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &form, &Theme::default())
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rendered: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("Who is the audience?"));
        assert!(rendered.contains("Round 1 of 2"));
    }

    fn render(form: &IterativeForm, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, form, &Theme::default())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_long_question_keeps_cursor_on_screen() {
        let question = "What outcome should the audience walk away with, considering \
            their background, the decisions they need to make next quarter, and any \
            follow-up actions, or changes in process?";
        let help = "Think about the one slide people should remember a week later, \
            and what you would like them to say about it to a colleague afterwards.";
        let mut form = form(2, vec![Question::with_help(question, help, 0)]);
        form.handle_event(FormEvent::Resize(40));
        for c in "partial answer".chars() {
            form.handle_event(FormEvent::Char(c));
        }

        let rendered = render(&form, 40, 16);
        assert!(rendered.contains("partial answer"));
        assert!(rendered.contains(CURSOR));
    }

    #[test]
    fn test_long_answer_list_keeps_cursor_on_screen() {
        let questions = (1..=12).map(|i| Question::new(&format!("Q{i}?"), 0)).collect();
        let mut form = form(1, questions);
        form.handle_event(FormEvent::Resize(40));
        for i in 1..=11 {
            answer(&mut form, &format!("answer {i}"));
        }
        for c in "draft".chars() {
            form.handle_event(FormEvent::Char(c));
        }

        let rendered = render(&form, 40, 12);
        assert!(rendered.contains("Previous answers"));
        assert!(rendered.contains(&format!("> draft{CURSOR}")));
    }

    #[test]
    fn test_short_text_is_not_scrolled() {
        let lines = vec![Line::from("one"), Line::from("two")];
        assert_eq!(scroll_offset(&lines, 20, 10), 0);
    }

    #[test]
    fn test_wrapped_rows_saturate() {
        let lines = vec![Line::from("x"); 70_000];
        assert_eq!(wrapped_rows(&lines, 10), u16::MAX);
    }
}
