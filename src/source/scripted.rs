//! Question source backed by a JSON script
//!
//! The script lists the rounds up front:
//!
//! ```json
//! {
//!   "rounds": [
//!     {
//!       "questions": [{ "question": "Who is the audience?", "help_text": "..." }],
//!       "needs_more_info": true,
//!       "rationale": "Audience drives tone",
//!       "confidence": 0.4
//!     }
//!   ]
//! }
//! ```

use super::traits::{QuestionSource, RoundPlan};
use crate::state::{QaPair, Question};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScriptFile {
    rounds: Vec<ScriptRound>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScriptRound {
    #[serde(default)]
    questions: Vec<ScriptQuestion>,
    #[serde(default)]
    needs_more_info: bool,
    #[serde(default)]
    rationale: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScriptQuestion {
    question: String,
    #[serde(default)]
    help_text: Option<String>,
}

/// Replays pre-written rounds of questions
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    rounds: Vec<ScriptRound>,
}

impl ScriptedSource {
    /// Load a script from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read question script {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid question script {}", path.display()))
    }

    /// Parse a script from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let script: ScriptFile = serde_json::from_str(json)?;
        Ok(Self {
            rounds: script.rounds,
        })
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

#[async_trait]
impl QuestionSource for ScriptedSource {
    async fn prepare(&mut self, round: usize, history: &[QaPair]) -> Result<RoundPlan> {
        tracing::debug!(round, answered = history.len(), "Preparing scripted round");

        let Some(script) = self.rounds.get(round) else {
            return Ok(RoundPlan::empty());
        };

        let questions = script
            .questions
            .iter()
            .map(|q| match &q.help_text {
                Some(help) => Question::with_help(&q.question, help, round),
                None => Question::new(&q.question, round),
            })
            .collect();

        Ok(RoundPlan {
            questions,
            needs_more_info: script.needs_more_info,
            rationale: script.rationale.clone(),
            confidence: script.confidence,
        })
    }
}
