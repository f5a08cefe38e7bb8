//! Key bindings and mouse → pointer event mapping.

use crate::drag::PointerId;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Restart,
    Pause,
    Quit,
    None,
}

/// Map key event to game action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Restart,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Action::Pause,
        _ => Action::None,
    }
}

/// Pointer gesture in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { pointer: PointerId, col: u16, row: u16 },
    Move { pointer: PointerId, col: u16, row: u16 },
    Up { pointer: PointerId },
}

/// Each mouse button is its own pointer.
fn pointer_for(button: MouseButton) -> PointerId {
    match button {
        MouseButton::Left => PointerId(0),
        MouseButton::Right => PointerId(1),
        MouseButton::Middle => PointerId(2),
    }
}

pub fn mouse_to_pointer(mouse: MouseEvent) -> Option<PointerEvent> {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(b) => Some(PointerEvent::Down {
            pointer: pointer_for(b),
            col,
            row,
        }),
        MouseEventKind::Drag(b) => Some(PointerEvent::Move {
            pointer: pointer_for(b),
            col,
            row,
        }),
        MouseEventKind::Up(b) => Some(PointerEvent::Up {
            pointer: pointer_for(b),
        }),
        _ => None,
    }
}
