//! Keyboard navigation: a two-state machine (unfocused, row-focused) that
//! turns key events into focus transitions, activation, and selection
//! toggles. The orchestrator only feeds it events while the grid holds input
//! focus, so inputs elsewhere in the host app are never swallowed.

use crossterm::event::{KeyCode, KeyEvent};

/// Which row, if any, holds the keyboard focus. The index points into the
/// materialized row model, always in `[0, len)` while focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Unfocused,
    Row(usize),
}

impl Focus {
    pub fn index(self) -> Option<usize> {
        match self {
            Focus::Unfocused => None,
            Focus::Row(i) => Some(i),
        }
    }

    /// Re-validate against a new row-model length: clamp into range, or drop
    /// to unfocused when the model emptied.
    pub fn clamped(self, len: usize) -> Focus {
        match self {
            Focus::Unfocused => Focus::Unfocused,
            Focus::Row(_) if len == 0 => Focus::Unfocused,
            Focus::Row(i) => Focus::Row(i.min(len - 1)),
        }
    }
}

/// What the orchestrator must do after a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Key is not a navigation key; let it fall through
    Ignored,
    /// Focus landed on a row; scroll it into view (nearest alignment)
    FocusMoved(usize),
    /// Enter on a focused row
    Activated(usize),
    /// Space on a focused row in multi-select mode
    ToggleSelection(usize),
    /// Escape dropped focus
    Exited,
}

/// Advance the state machine for one key event.
///
/// Down/`j` and Up/`k` saturate at the ends of the row model. Enter and Space
/// leave focus where it is. Escape always exits, focused or not.
pub fn transition(
    focus: Focus,
    key: &KeyEvent,
    row_count: usize,
    multi_select: bool,
) -> (Focus, NavOutcome) {
    if row_count == 0 {
        return match key.code {
            KeyCode::Esc => (Focus::Unfocused, NavOutcome::Exited),
            _ => (focus, NavOutcome::Ignored),
        };
    }
    let last = row_count - 1;

    match (focus, key.code) {
        (Focus::Unfocused, KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k')) => {
            (Focus::Row(0), NavOutcome::FocusMoved(0))
        }
        (Focus::Row(i), KeyCode::Down | KeyCode::Char('j')) => {
            let next = (i + 1).min(last);
            (Focus::Row(next), NavOutcome::FocusMoved(next))
        }
        (Focus::Row(i), KeyCode::Up | KeyCode::Char('k')) => {
            let next = i.saturating_sub(1);
            (Focus::Row(next), NavOutcome::FocusMoved(next))
        }
        (Focus::Row(i), KeyCode::Enter) => (focus, NavOutcome::Activated(i)),
        (Focus::Row(i), KeyCode::Char(' ')) if multi_select => {
            (focus, NavOutcome::ToggleSelection(i))
        }
        (_, KeyCode::Esc) => (Focus::Unfocused, NavOutcome::Exited),
        _ => (focus, NavOutcome::Ignored),
    }
}
