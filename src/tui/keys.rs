//! Key bindings and the threshold prompt

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::{Action, SortKey};

/// What a key press in normal mode asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    /// Open the threshold prompt.
    EditThreshold,
}

/// Map a key press to a command. Unbound keys give `None`.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Act(Action::Quit)),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::Home,
        KeyCode::End | KeyCode::Char('G') => Action::End,
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => Action::Expand,
        KeyCode::Left => Action::CollapseOrAscend,
        KeyCode::Char('s' | 'S') => Action::SortBy(SortKey::Size),
        KeyCode::Char('n' | 'N') => Action::SortBy(SortKey::Name),
        KeyCode::Char('h' | 'H') => Action::ToggleNumberFormat,
        KeyCode::Char('t' | 'T') => return Some(Command::EditThreshold),
        _ => return None,
    };
    Some(Command::Act(action))
}

/// Result of feeding a key to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Cancel,
    Submit(u64),
}

/// Longest input accepted; `u64::MAX` has 20 digits.
const MAX_DIGITS: usize = 20;

/// Digit entry for a new threshold.
#[derive(Debug, Clone, Default)]
pub struct ThresholdPrompt {
    input: String,
}

impl ThresholdPrompt {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle(&mut self, key: KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Esc => PromptOutcome::Cancel,
            KeyCode::Enter => PromptOutcome::Submit(self.value()),
            KeyCode::Backspace => {
                self.input.pop();
                PromptOutcome::Pending
            }
            KeyCode::Char(c) if c.is_ascii_digit() && self.input.len() < MAX_DIGITS => {
                self.input.push(c);
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    /// Entered value; empty input means 0, overflow saturates.
    fn value(&self) -> u64 {
        self.input.bytes().fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        })
    }
}
