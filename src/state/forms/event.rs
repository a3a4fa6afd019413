//! Input events understood by the iterative form

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The reduced event set the form state machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A character to append to the input buffer (including `'\n'`)
    Char(char),
    Backspace,
    Submit,
    Cancel,
    /// The terminal reported a new width
    Resize(u16),
}

impl FormEvent {
    /// Translate a raw crossterm event, dropping anything the form ignores
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(width, _height) => Some(FormEvent::Resize(width)),
            _ => None,
        }
    }

    /// Translate a key event
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(FormEvent::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(FormEvent::Cancel)
            }
            // Alt+Enter / Shift+Enter insert a line break instead of submitting
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                Some(FormEvent::Char('\n'))
            }
            KeyCode::Enter => Some(FormEvent::Submit),
            KeyCode::Backspace => Some(FormEvent::Backspace),
            KeyCode::Tab => Some(FormEvent::Char('\t')),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(c) => Some(FormEvent::Char(c)),
            _ => None,
        }
    }
}
