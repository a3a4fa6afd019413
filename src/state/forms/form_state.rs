//! Iterative question/answer form state machine

use super::event::FormEvent;
use super::question::{QaPair, Question};
use thiserror::Error;

/// Display width assumed until the terminal reports its size
pub const DEFAULT_DISPLAY_WIDTH: u16 = 80;

/// Construction-time settings for an iterative form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Maximum number of question rounds (at least 1)
    pub max_rounds: usize,
    /// Shown under the round indicator while answering
    pub round_prompt: String,
    /// Asked at the end of each round that is not the last
    pub continuation_prompt: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            round_prompt: "Gathering context...".to_string(),
            continuation_prompt: "Do you want to provide more information?".to_string(),
        }
    }
}

/// How a form reached its terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Round finished and the user asked for another one
    MoreRequested,
    /// No more rounds: budget reached or the user declined
    Finished,
    /// The user aborted the form
    Cancelled,
}

/// Mutually exclusive phases of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    AnsweringQuestion,
    AskingContinuation,
    Complete(Outcome),
}

/// Input the user has to correct before the form moves on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Answer required")]
    AnswerRequired,
    #[error("Please answer yes or no")]
    YesOrNo,
}

/// Calls the form refuses because they would corrupt its state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("round budget must be at least 1")]
    InvalidRoundBudget,
    #[error("round {round} is still in progress")]
    RoundInProgress { round: usize },
    #[error("all {max_rounds} rounds have been used")]
    RoundBudgetExhausted { max_rounds: usize },
    #[error("question for round {got} cannot follow round {expected_at_least}")]
    RoundOutOfOrder { expected_at_least: usize, got: usize },
    #[error("question for round {got} skips ahead of round {current}")]
    RoundSkipped { current: usize, got: usize },
    #[error("question for round {round} exceeds the budget of {max_rounds} rounds")]
    RoundOutOfBudget { round: usize, max_rounds: usize },
    #[error("form is closed")]
    FormClosed,
}

/// A form that asks questions one at a time, round by round
#[derive(Debug, Clone)]
pub struct IterativeForm {
    title: String,
    config: FormConfig,
    questions: Vec<Question>,
    /// Positionally aligned with `questions`
    responses: Vec<String>,
    cursor: usize,
    round: usize,
    input: String,
    error: Option<ValidationError>,
    phase: FormPhase,
    display_width: u16,
}

impl IterativeForm {
    pub fn new(title: &str, config: FormConfig) -> Result<Self, FormError> {
        if config.max_rounds == 0 {
            return Err(FormError::InvalidRoundBudget);
        }

        Ok(Self {
            title: title.to_string(),
            config,
            questions: Vec::new(),
            responses: Vec::new(),
            cursor: 0,
            round: 0,
            input: String::new(),
            error: None,
            phase: FormPhase::AnsweringQuestion,
            display_width: DEFAULT_DISPLAY_WIDTH,
        })
    }

    /// Append a batch of questions.
    ///
    /// Questions must belong to the current round or the one right after it,
    /// in non-decreasing round order. The whole batch is rejected otherwise.
    pub fn add_questions(&mut self, questions: Vec<Question>) -> Result<(), FormError> {
        if matches!(
            self.phase,
            FormPhase::Complete(Outcome::Finished | Outcome::Cancelled)
        ) {
            return Err(FormError::FormClosed);
        }

        // A round that already left the answering phase is closed to new questions
        let min_round = if self.phase == FormPhase::AnsweringQuestion {
            self.round
        } else {
            self.round + 1
        };
        let mut floor = self
            .questions
            .last()
            .map_or(min_round, |q| q.round.max(min_round));
        for q in &questions {
            if q.round < floor {
                return Err(FormError::RoundOutOfOrder {
                    expected_at_least: floor,
                    got: q.round,
                });
            }
            if q.round > self.round + 1 {
                return Err(FormError::RoundSkipped {
                    current: self.round,
                    got: q.round,
                });
            }
            if q.round >= self.config.max_rounds {
                return Err(FormError::RoundOutOfBudget {
                    round: q.round,
                    max_rounds: self.config.max_rounds,
                });
            }
            floor = q.round;
        }

        tracing::debug!(
            count = questions.len(),
            round = self.round,
            "Adding questions to form"
        );
        self.questions.extend(questions);
        self.settle_round();
        Ok(())
    }

    /// Move to the next round after the user asked for more information
    pub fn advance_round(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Complete(Outcome::MoreRequested) => {}
            FormPhase::Complete(_) => return Err(FormError::FormClosed),
            FormPhase::AnsweringQuestion | FormPhase::AskingContinuation => {
                return Err(FormError::RoundInProgress { round: self.round })
            }
        }
        if self.round + 1 >= self.config.max_rounds {
            return Err(FormError::RoundBudgetExhausted {
                max_rounds: self.config.max_rounds,
            });
        }

        self.round += 1;
        self.phase = FormPhase::AnsweringQuestion;
        self.input.clear();
        self.error = None;
        tracing::info!(round = self.round, "Advanced to next round");
        self.settle_round();
        Ok(())
    }

    /// Apply one input event
    pub fn handle_event(&mut self, event: FormEvent) {
        if let FormEvent::Resize(width) = event {
            self.display_width = width;
            return;
        }
        if self.is_complete() {
            return;
        }

        match event {
            FormEvent::Cancel => {
                self.error = None;
                self.phase = FormPhase::Complete(Outcome::Cancelled);
                tracing::info!(
                    round = self.round,
                    answered = self.responses.len(),
                    "Form cancelled"
                );
            }
            FormEvent::Backspace => {
                self.input.pop();
            }
            FormEvent::Char(c) => self.input.push(c),
            FormEvent::Submit => match self.phase {
                FormPhase::AskingContinuation => self.submit_continuation(),
                _ => self.submit_answer(),
            },
            FormEvent::Resize(_) => {}
        }
    }

    fn submit_answer(&mut self) {
        if self.current_question().is_none() {
            return;
        }

        let answer = self.input.trim();
        if answer.is_empty() {
            self.error = Some(ValidationError::AnswerRequired);
            return;
        }

        self.responses.push(answer.to_string());
        self.cursor += 1;
        self.input.clear();
        self.error = None;
        self.settle_round();
    }

    fn submit_continuation(&mut self) {
        let reply = self.input.trim().to_lowercase();
        let outcome = match reply.as_str() {
            "yes" | "y" => Outcome::MoreRequested,
            "no" | "n" => Outcome::Finished,
            _ => {
                self.error = Some(ValidationError::YesOrNo);
                self.input.clear();
                return;
            }
        };

        self.input.clear();
        self.error = None;
        self.phase = FormPhase::Complete(outcome);
        tracing::info!(round = self.round, ?outcome, "Continuation answered");
    }

    /// Leave the answering phase once the current round has no unanswered questions
    fn settle_round(&mut self) {
        if self.phase != FormPhase::AnsweringQuestion || self.cursor < self.round_end() {
            return;
        }

        if self.round + 1 < self.config.max_rounds {
            self.phase = FormPhase::AskingContinuation;
        } else {
            self.phase = FormPhase::Complete(Outcome::Finished);
            tracing::info!(round = self.round, "Round budget reached");
        }
    }

    /// Number of questions in rounds before the current one
    fn round_start(&self) -> usize {
        self.questions.iter().filter(|q| q.round < self.round).count()
    }

    /// Cumulative number of questions up to and including the current round
    fn round_end(&self) -> usize {
        self.questions.iter().filter(|q| q.round <= self.round).count()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, FormPhase::Complete(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            FormPhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Reached the hard terminal without asking for more.
    ///
    /// False after a cancellation; check `is_cancelled` (or `outcome`) to
    /// tell an aborted form apart from one still in progress.
    #[allow(dead_code)]
    pub fn is_done(&self) -> bool {
        self.phase == FormPhase::Complete(Outcome::Finished)
    }

    pub fn needs_more_info(&self) -> bool {
        self.phase == FormPhase::Complete(Outcome::MoreRequested)
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == FormPhase::Complete(Outcome::Cancelled)
    }

    pub fn current_round(&self) -> usize {
        self.round
    }

    #[allow(dead_code)]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    /// Answers to the questions stamped with `round`, in order
    #[allow(dead_code)]
    pub fn responses_for_round(&self, round: usize) -> Vec<&str> {
        self.questions
            .iter()
            .zip(&self.responses)
            .filter(|(q, _)| q.round == round)
            .map(|(_, r)| r.as_str())
            .collect()
    }

    /// Question/answer pairs for `round`, in order
    pub fn qa_pairs_for_round(&self, round: usize) -> Vec<QaPair> {
        self.questions
            .iter()
            .zip(&self.responses)
            .filter(|(q, _)| q.round == round)
            .map(|(q, r)| QaPair {
                question: q.text.clone(),
                answer: r.clone(),
            })
            .collect()
    }

    /// The question waiting for an answer, if the form is answering one
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != FormPhase::AnsweringQuestion || self.cursor >= self.round_end() {
            return None;
        }
        self.questions.get(self.cursor)
    }

    /// One-based position of the current question and the round's question count
    pub fn round_progress(&self) -> (usize, usize) {
        let start = self.round_start();
        let total = self.round_end() - start;
        let position = (self.cursor - start.min(self.cursor) + 1).min(total.max(1));
        (position, total)
    }

    /// Answers given so far in the current round, with their zero-based index in the round
    pub fn round_answers(&self) -> impl Iterator<Item = (usize, &str)> {
        let start = self.round_start();
        self.responses
            .iter()
            .enumerate()
            .skip(start)
            .take(self.cursor.saturating_sub(start))
            .map(move |(i, r)| (i - start, r.as_str()))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn display_width(&self) -> u16 {
        self.display_width
    }
}
