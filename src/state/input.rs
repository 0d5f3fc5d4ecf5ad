//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard module.
//! Provides event polling, conversion, and routing.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to appropriate handler
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::state::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent,
    KeyCode, KeyEventKind, KeyModifiers,
    KeyEvent as CrosstermKeyEvent,
    poll, read,
};
use std::time::Duration;

use crate::error::Result;
use super::keyboard::{KeyboardEvent, KeyState, Modifiers};

/// Literal payload terminals deliver for the backspace key.
pub const BACKSPACE: &str = "\u{7f}";

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for our framework
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard event (key press, repeat, release)
    Key(KeyboardEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent.
///
/// Fills both the symbolic identity and the literal payload, so the
/// classifier can fall back to characters when a key has no name.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let (key, text) = match event.code {
        KeyCode::Char(c) => (c.to_string(), c.to_string()),
        KeyCode::Enter => ("Enter".to_string(), "\r".to_string()),
        KeyCode::Tab => ("Tab".to_string(), "\t".to_string()),
        KeyCode::BackTab => ("Tab".to_string(), "\t".to_string()),
        KeyCode::Backspace => ("Backspace".to_string(), BACKSPACE.to_string()),
        KeyCode::Delete => ("Delete".to_string(), String::new()),
        KeyCode::Esc => ("Escape".to_string(), String::new()),
        KeyCode::Up => ("ArrowUp".to_string(), String::new()),
        KeyCode::Down => ("ArrowDown".to_string(), String::new()),
        KeyCode::Left => ("ArrowLeft".to_string(), String::new()),
        KeyCode::Right => ("ArrowRight".to_string(), String::new()),
        KeyCode::Home => ("Home".to_string(), String::new()),
        KeyCode::End => ("End".to_string(), String::new()),
        KeyCode::PageUp => ("PageUp".to_string(), String::new()),
        KeyCode::PageDown => ("PageDown".to_string(), String::new()),
        KeyCode::F(n) => (format!("F{}", n), String::new()),
        KeyCode::Insert => ("Insert".to_string(), String::new()),
        _ => (String::new(), String::new()),
    };

    let mut modifiers = convert_modifiers(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers |= Modifiers::SHIFT;
    }
    // Shift is already folded into a printable character ('A', '!').
    if let KeyCode::Char(c) = event.code {
        if !c.is_control() && modifiers == Modifiers::SHIFT {
            modifiers = Modifiers::empty();
        }
    }

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        text,
        modifiers,
        state,
    }
}

// =============================================================================
// MODIFIER CONVERSION
// =============================================================================

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(
        Modifiers::META,
        mods.intersects(KeyModifiers::SUPER | KeyModifiers::META | KeyModifiers::HYPER),
    );
    out
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> Result<InputEvent> {
    Ok(convert_event(read()?))
}

fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the appropriate handler.
/// Returns true if any handler consumed the event.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => super::keyboard::dispatch(key),
        InputEvent::Resize(w, h) => {
            crate::pipeline::terminal::set_terminal_size(w, h);
            false
        }
        InputEvent::None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_key_char() {
        let event = convert_key_event(key(KeyCode::Char('a'), KeyModifiers::empty()));

        assert_eq!(event.key, "a");
        assert_eq!(event.text, "a");
        assert_eq!(event.state, KeyState::Press);
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_convert_control_keys_carry_literals() {
        let cases = [
            (KeyCode::Enter, "Enter", "\r"),
            (KeyCode::Tab, "Tab", "\t"),
            (KeyCode::Backspace, "Backspace", BACKSPACE),
            (KeyCode::Esc, "Escape", ""),
            (KeyCode::Delete, "Delete", ""),
        ];

        for (code, expected_key, expected_text) in cases {
            let event = convert_key_event(key(code, KeyModifiers::empty()));
            assert_eq!(event.key, expected_key);
            assert_eq!(event.text, expected_text, "payload for {}", expected_key);
        }
    }

    #[test]
    fn test_convert_key_navigation() {
        let keys = [
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Down, "ArrowDown"),
            (KeyCode::Left, "ArrowLeft"),
            (KeyCode::Right, "ArrowRight"),
            (KeyCode::Home, "Home"),
            (KeyCode::End, "End"),
            (KeyCode::PageUp, "PageUp"),
            (KeyCode::PageDown, "PageDown"),
            (KeyCode::F(5), "F5"),
        ];

        for (code, expected) in keys {
            let event = convert_key_event(key(code, KeyModifiers::empty()));
            assert_eq!(event.key, expected);
            assert!(event.text.is_empty());
        }
    }

    #[test]
    fn test_shifted_character_drops_shift() {
        let event = convert_key_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(event.text, "A");
        assert!(event.modifiers.is_empty());

        let event = convert_key_event(key(
            KeyCode::Char('A'),
            KeyModifiers::SHIFT | KeyModifiers::CONTROL,
        ));
        assert_eq!(event.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
    }

    #[test]
    fn test_back_tab_is_shift_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::empty()));
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn test_convert_key_with_ctrl() {
        let event = convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event.key, "c");
        assert_eq!(event.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_convert_key_with_all_modifiers() {
        let event = convert_key_event(key(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::SUPER,
        ));
        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert!(event.modifiers.contains(Modifiers::ALT));
        assert!(event.modifiers.contains(Modifiers::SHIFT));
        assert!(event.modifiers.contains(Modifiers::META));
    }

    #[test]
    fn test_convert_key_states() {
        let kinds = [
            (KeyEventKind::Press, KeyState::Press),
            (KeyEventKind::Repeat, KeyState::Repeat),
            (KeyEventKind::Release, KeyState::Release),
        ];

        for (kind, expected) in kinds {
            let event = convert_key_event(CrosstermKeyEvent {
                kind,
                ..key(KeyCode::Char('a'), KeyModifiers::empty())
            });
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_convert_event_variants() {
        let resize = convert_event(CrosstermEvent::Resize(120, 40));
        assert_eq!(resize, InputEvent::Resize(120, 40));

        let focus = convert_event(CrosstermEvent::FocusGained);
        assert_eq!(focus, InputEvent::None);
        assert!(!route_event(focus));
    }
}
