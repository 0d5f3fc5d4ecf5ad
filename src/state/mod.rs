//! State Module - Runtime state management systems
//!
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm event conversion and polling
//! - **Focus** - Focus flag resolution for the hidden input surface
//! - **Scheduler** - Deferred execution on the next event-loop turn
//! - **Global keys** - Ctrl+C shutdown

pub mod focus;
pub mod global_keys;
pub mod input;
pub mod keyboard;
pub mod scheduler;

pub use focus::FocusBinding;
pub use keyboard::{
    KeyboardEvent, KeyState, Modifiers, KeyHandler,
    dispatch as dispatch_keyboard, on as on_keyboard,
    last_event, last_key, reset_keyboard_state,
};
pub use scheduler::{defer, flush, pending, reset_scheduler};
