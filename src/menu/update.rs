//! Pure menu transitions: key → Action, (index, Action) → Transition.
//!
//! Fully testable without a terminal. Keys that mean nothing in the
//! current mode map to `None` and are dropped by the caller.

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{Action, Direction, MenuMode, Transition};

/// Map a key event to an action for the given mode.
///
/// Numbered menus only understand the digits `1`-`9`; highlighted menus
/// only the up/down arrows and Enter.
pub fn map_key(mode: &MenuMode, key: KeyEvent) -> Option<Action> {
    match mode {
        MenuMode::Numbered => match key.code {
            KeyCode::Char(c @ '1'..='9') => Some(Action::Digit(c as u8 - b'0')),
            _ => None,
        },
        MenuMode::Highlighted(_) => match key.code {
            KeyCode::Up => Some(Action::Move(Direction::Up)),
            KeyCode::Down => Some(Action::Move(Direction::Down)),
            KeyCode::Enter => Some(Action::Confirm),
            _ => None,
        },
    }
}

/// Index reached by moving one step from `selected` in a menu of `len`.
pub fn step(selected: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Up if selected == 0 => len.saturating_sub(1),
        Direction::Up => selected - 1,
        Direction::Down if selected + 1 >= len => 0,
        Direction::Down => selected + 1,
    }
}

/// Pure transition function over the selected index.
///
/// A move that lands on the same index (a one-option menu) is `Stay`,
/// so nothing gets repainted.
pub fn update(selected: usize, len: usize, action: Action) -> Transition {
    match action {
        Action::Move(direction) => {
            let to = step(selected, len, direction);
            if to == selected {
                Transition::Stay
            } else {
                Transition::Move { from: selected, to }
            }
        }
        Action::Digit(d) if d >= 1 && usize::from(d) <= len => {
            Transition::Select(usize::from(d) - 1)
        }
        Action::Digit(_) => Transition::Stay,
        Action::Confirm => Transition::Select(selected),
    }
}
