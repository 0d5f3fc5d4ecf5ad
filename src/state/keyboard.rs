//! Keyboard Module - Keyboard event state and handler registry
//!
//! State and handler registry for keyboard events.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `last_key` - Get last key pressed
//! - `on(handler)` - Subscribe to all key-down events (press and repeat)
//! - `dispatch(event)` - Offer an event to the registered handlers
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::state::keyboard;
//!
//! let cleanup = keyboard::on(|event| {
//!     println!("Key: {} ({:?})", event.key, event.text);
//!     false // Don't consume
//! });
//!
//! keyboard::dispatch(keyboard::KeyboardEvent::char('a'));
//! cleanup();
//! ```

use std::cell::RefCell;
use bitflags::bitflags;
use spark_signals::{signal, Signal};

// =============================================================================
// TYPES
// =============================================================================

bitflags! {
    /// Keyboard modifier state
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::empty()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self::CTRL
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self::SHIFT
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// Symbolic key identity (e.g., "a", "Enter", "Backspace", "ArrowUp")
    pub key: String,
    /// Literal characters resolved for this keystroke (empty for pure control keys)
    pub text: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a key press event.
    ///
    /// A single-character key carries itself as the literal payload;
    /// anything longer is treated as a named key with no payload.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let text = if key.chars().count() == 1 {
            key.clone()
        } else {
            String::new()
        };
        Self {
            key,
            text,
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
        }
    }

    /// Create a named key press with no literal payload
    pub fn named(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: String::new(),
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
        }
    }

    /// Create a character key press
    pub fn char(c: char) -> Self {
        Self {
            key: c.to_string(),
            text: c.to_string(),
            modifiers: Modifiers::empty(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::new(key)
        }
    }

    /// Replace the literal payload
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Replace the press/repeat/release state
    pub fn with_state(mut self, state: KeyState) -> Self {
        self.state = state;
        self
    }

    /// Check if this is a key-down delivery (initial press or auto-repeat)
    pub fn is_key_down(&self) -> bool {
        self.state != KeyState::Release
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    handlers: Vec<(usize, KeyHandler)>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Press and repeat deliveries reach the handlers; releases only update
/// the reactive `last_event` state.
pub fn dispatch(event: KeyboardEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if !event.is_key_down() {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        for (_, handler) in &reg.handlers {
            if handler(&event) {
                return true;
            }
        }
        false
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all key-down events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.handlers.push((id, Box::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Number of registered handlers
pub fn handler_count() -> usize {
    REGISTRY.with(|reg| reg.borrow().handlers.len())
}

/// Clear all state and handlers.
pub fn cleanup() {
    REGISTRY.with(|reg| reg.borrow_mut().handlers.clear());
    LAST_EVENT.with(|s| s.set(None));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================
