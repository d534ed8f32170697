use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{Focus, Phase};
use crate::constants::{CURSOR_STEP, CURSOR_STEP_FAST};
use crate::controller::page_rows;
use crate::messages::UiEvent;

/// Map keyboard input to UiEvent based on current phase and focus
pub fn handle_key(key: KeyEvent, phase: Phase, focus: Focus) -> Option<UiEvent> {
    // Global keys
    match key.code {
        // Esc cancels a running recording, otherwise quits
        KeyCode::Esc if phase == Phase::Recording => return Some(UiEvent::CancelRecording),
        KeyCode::Esc => return Some(UiEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(UiEvent::Quit);
        }
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Enter | KeyCode::Char('r') => return Some(UiEvent::StartRecording),
        KeyCode::Tab => return Some(UiEvent::FocusNext),
        KeyCode::BackTab => return Some(UiEvent::FocusPrev),
        KeyCode::Char('d') => return Some(UiEvent::ToggleDataView),
        KeyCode::Char('s') => return Some(UiEvent::ToggleScaling),
        KeyCode::PageDown => return Some(UiEvent::ScrollData(page_rows(true))),
        KeyCode::PageUp => return Some(UiEvent::ScrollData(page_rows(false))),
        _ => {}
    }

    match focus {
        Focus::Param(_) => handle_param_key(key),
        Focus::Waveform => handle_waveform_key(key),
    }
}

fn handle_param_key(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(UiEvent::Adjust(true))
        }
        KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => Some(UiEvent::Adjust(false)),
        _ => None,
    }
}

fn handle_waveform_key(key: KeyEvent) -> Option<UiEvent> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        CURSOR_STEP_FAST
    } else {
        CURSOR_STEP
    };
    match key.code {
        KeyCode::Left => Some(UiEvent::MoveCursor(-step)),
        KeyCode::Right => Some(UiEvent::MoveCursor(step)),
        KeyCode::Char(' ') => Some(UiEvent::ToggleAnchor),
        KeyCode::Backspace | KeyCode::Delete => Some(UiEvent::ClearSelection),
        KeyCode::Up => Some(UiEvent::ScrollData(-1)),
        KeyCode::Down => Some(UiEvent::ScrollData(1)),
        _ => None,
    }
}

/// Left-button press/drag/release become pointer events; the controller
/// decides whether they land on the waveform.
pub fn handle_mouse(mouse: MouseEvent) -> Option<UiEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(UiEvent::PointerDown(mouse.column, mouse.row))
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            Some(UiEvent::PointerDrag(mouse.column, mouse.row))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(UiEvent::PointerUp(mouse.column, mouse.row)),
        MouseEventKind::ScrollDown => Some(UiEvent::ScrollData(3)),
        MouseEventKind::ScrollUp => Some(UiEvent::ScrollData(-3)),
        _ => None,
    }
}

/// Key labels for the hint bar
pub fn key_hints(phase: Phase, focus: Focus) -> Vec<(&'static str, &'static str)> {
    if phase == Phase::Recording {
        return vec![("Esc", "Cancel"), ("Q", "Quit")];
    }

    let mut hints = vec![("Enter", "Start"), ("Tab", "Focus"), ("Q", "Quit")];

    match focus {
        Focus::Param(_) => {
            hints.insert(2, ("↑/↓", "Adjust"));
        }
        Focus::Waveform => {
            hints.insert(2, ("←/→", "Cursor"));
            hints.insert(3, ("Space", "Box"));
            hints.insert(4, ("Bksp", "Clear"));
            hints.insert(5, ("Drag", "Select"));
        }
    }

    if phase == Phase::Viewing {
        let at = hints.len() - 1;
        hints.insert(at, ("D", "Data"));
        hints.insert(at + 1, ("PgUp/PgDn", "Scroll"));
        hints.insert(at + 2, ("S", "Scaling"));
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamField;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    const PARAM: Focus = Focus::Param(ParamField::Duration);

    #[test]
    fn esc_cancels_only_while_recording() {
        assert_eq!(
            handle_key(key(KeyCode::Esc), Phase::Recording, PARAM),
            Some(UiEvent::CancelRecording)
        );
        assert_eq!(handle_key(key(KeyCode::Esc), Phase::Viewing, PARAM), Some(UiEvent::Quit));
    }

    #[test]
    fn arrows_depend_on_focus() {
        assert_eq!(
            handle_key(key(KeyCode::Right), Phase::Idle, PARAM),
            Some(UiEvent::Adjust(true))
        );
        assert_eq!(
            handle_key(key(KeyCode::Right), Phase::Viewing, Focus::Waveform),
            Some(UiEvent::MoveCursor(CURSOR_STEP))
        );
        let fast = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(
            handle_key(fast, Phase::Viewing, Focus::Waveform),
            Some(UiEvent::MoveCursor(-CURSOR_STEP_FAST))
        );
    }

    #[test]
    fn space_anchors_box_on_waveform() {
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), Phase::Viewing, Focus::Waveform),
            Some(UiEvent::ToggleAnchor)
        );
        assert_eq!(handle_key(key(KeyCode::Char(' ')), Phase::Viewing, PARAM), None);
    }

    #[test]
    fn mouse_left_button_maps_to_pointer() {
        let ev = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handle_mouse(ev), Some(UiEvent::PointerDrag(7, 3)));
        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..ev
        };
        assert_eq!(handle_mouse(right), None);
    }

    #[test]
    fn hints_follow_phase() {
        assert_eq!(key_hints(Phase::Recording, PARAM)[0], ("Esc", "Cancel"));
        let viewing = key_hints(Phase::Viewing, Focus::Waveform);
        assert!(viewing.contains(&("D", "Data")));
        assert_eq!(viewing.last(), Some(&("Q", "Quit")));
        assert!(!key_hints(Phase::Idle, PARAM).contains(&("D", "Data")));
    }
}
