//! Gathering session: drives the form round by round
//!
//! The form itself never waits on anything but the next input event. Between
//! rounds the session asks the question source for more questions, pushes
//! them into the form and runs the input loop again.

use crate::source::QuestionSource;
use crate::state::{FormError, FormEvent, IterativeForm, QaPair};
use crate::ui::{self, Theme};
use crossterm::event::Event;
use ratatui::{backend::Backend, Terminal};
use std::io;
use thiserror::Error;

/// Errors that end a session early
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user cancelled; the caller must abandon the whole operation
    #[error("information gathering cancelled")]
    Cancelled,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("failed to prepare questions for round {round}: {cause:#}")]
    Source { round: usize, cause: anyhow::Error },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Why the session stopped asking questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source had no questions for the next round
    NoMoreQuestions,
    /// The source reported it had enough information
    SourceSatisfied,
    /// Every round in the budget was used
    RoundBudgetReached,
    /// The user answered "no" to the continuation prompt
    UserDeclined,
}

/// Summary of a session that ran to completion
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub stop_reason: StopReason,
    pub rounds_completed: usize,
    pub qa_pairs: Vec<QaPair>,
    /// Confidence reported with the last round, if any
    pub confidence: Option<f32>,
}

/// Run the render → read → transition loop until the form completes
pub fn run_form<B, F>(
    terminal: &mut Terminal<B>,
    form: &mut IterativeForm,
    theme: &Theme,
    mut next_event: F,
) -> Result<(), SessionError>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    let size = terminal.size()?;
    form.handle_event(FormEvent::Resize(size.width));

    loop {
        terminal.draw(|frame| ui::draw(frame, form, theme))?;
        if form.is_complete() {
            return Ok(());
        }

        if let Some(event) = FormEvent::from_crossterm(next_event()?) {
            form.handle_event(event);
        }
    }
}

/// A multi-round gathering session over one form
pub struct Session<S: QuestionSource> {
    source: S,
    form: IterativeForm,
    theme: Theme,
}

impl<S: QuestionSource> Session<S> {
    pub fn new(source: S, form: IterativeForm, theme: Theme) -> Self {
        Self {
            source,
            form,
            theme,
        }
    }

    pub fn form(&self) -> &IterativeForm {
        &self.form
    }

    /// Gather answers until the source, the user or the round budget stops the session
    pub async fn run<B, F>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut next_event: F,
    ) -> Result<SessionReport, SessionError>
    where
        B: Backend,
        F: FnMut() -> io::Result<Event>,
    {
        let max_rounds = self.form.config().max_rounds;
        let mut qa_pairs: Vec<QaPair> = Vec::new();
        let mut rounds_completed = 0;
        let mut confidence = None;

        let mut round = 0;
        let stop_reason = loop {
            tracing::info!(round = round + 1, max_rounds, "Preparing questions");

            let plan = self
                .source
                .prepare(round, &qa_pairs)
                .await
                .map_err(|cause| SessionError::Source { round, cause })?;
            if let Some(rationale) = &plan.rationale {
                tracing::info!(round, confidence = ?plan.confidence, "{rationale}");
            }
            confidence = plan.confidence.or(confidence);

            if plan.questions.is_empty() {
                break StopReason::NoMoreQuestions;
            }

            // Next round's questions go in before the form leaves the finished round
            self.form.add_questions(plan.questions)?;
            if round > self.form.current_round() {
                self.form.advance_round()?;
            }
            run_form(terminal, &mut self.form, &self.theme, &mut next_event)?;

            if self.form.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            qa_pairs.extend(self.form.qa_pairs_for_round(round));
            rounds_completed += 1;

            if !plan.needs_more_info {
                break StopReason::SourceSatisfied;
            }
            if round + 1 >= max_rounds {
                break StopReason::RoundBudgetReached;
            }
            if !self.form.needs_more_info() {
                break StopReason::UserDeclined;
            }
            round += 1;
        };

        tracing::info!(
            ?stop_reason,
            rounds_completed,
            answers = qa_pairs.len(),
            "Information gathering finished"
        );

        Ok(SessionReport {
            stop_reason,
            rounds_completed,
            qa_pairs,
            confidence,
        })
    }
}
