//! Question sources for the gathering session

mod scripted;
mod traits;

pub use scripted::ScriptedSource;
pub use traits::{QuestionSource, RoundPlan};

#[cfg(test)]
pub use traits::MockQuestionSource;
