//! UI module for rendering the TUI

mod forms;
mod theme;

pub use forms::outcome_message;
pub use theme::Theme;

use crate::state::IterativeForm;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, form: &IterativeForm, theme: &Theme) {
    let area = frame.area();
    forms::draw(frame, area, form, theme);
}
