//! Trait abstraction for the service that supplies question rounds

use crate::state::{QaPair, Question};
use anyhow::Result;
use async_trait::async_trait;

/// Questions for one round plus the service's view of whether more are needed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundPlan {
    pub questions: Vec<Question>,
    /// Whether the service wants another round after this one
    pub needs_more_info: bool,
    pub rationale: Option<String>,
    /// Confidence in the information gathered so far, 0.0 to 1.0
    pub confidence: Option<f32>,
}

impl RoundPlan {
    /// A plan with no questions, ending the dialogue
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Supplier of question rounds, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Prepare the questions for `round`, given every answer gathered so far
    async fn prepare(&mut self, round: usize, history: &[QaPair]) -> Result<RoundPlan>;
}
