//! Serializable record of a finished gathering session

use crate::state::{IterativeForm, QaPair};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Answers from one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTranscript {
    pub round: usize,
    pub pairs: Vec<QaPair>,
}

/// Everything the user answered, grouped by round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: Uuid,
    pub title: String,
    pub gathered_at: DateTime<Utc>,
    pub rounds: Vec<RoundTranscript>,
}

impl Transcript {
    /// Collect the answered rounds of `form`
    pub fn from_form(form: &IterativeForm) -> Self {
        let rounds = (0..=form.current_round())
            .map(|round| RoundTranscript {
                round,
                pairs: form.qa_pairs_for_round(round),
            })
            .filter(|r| !r.pairs.is_empty())
            .collect();

        Self {
            id: Uuid::new_v4(),
            title: form.title().to_string(),
            gathered_at: Utc::now(),
            rounds,
        }
    }

    pub fn answer_count(&self) -> usize {
        self.rounds.iter().map(|r| r.pairs.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the transcript as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write transcript {}", path.display()))?;
        Ok(())
    }
}
