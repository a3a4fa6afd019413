//! Form rendering module
//!
//! - `field_renderer`: input wrapping and answer truncation
//! - `iterative_form`: the question/continuation/outcome views

mod field_renderer;
mod iterative_form;

pub use iterative_form::{draw, outcome_message};
