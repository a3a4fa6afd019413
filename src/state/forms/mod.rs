//! Form domain layer
//!
//! The iterative question/answer form: question values, input events and
//! the state machine that ties them together.

mod event;
mod form_state;
mod question;

pub use event::FormEvent;
pub use form_state::{FormConfig, FormError, FormPhase, IterativeForm, Outcome};
pub use question::{QaPair, Question};
