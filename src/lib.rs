//! # spark-quick-search
//!
//! Type-to-search for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! Attach quick search to a scope and the user can start typing without
//! first focusing the search field: unmodified keystrokes are turned into
//! edits on the host's query signal, and the hidden input surface is kept
//! focused whenever the query is empty.
//!
//! ```text
//! crossterm KeyEvent → KeyboardEvent → classify → Action → deferred edit → Signal<String>
//! ```
//!
//! ## Modules
//!
//! - [`quick_search`] - Classifier, controller, attach options
//! - [`state`] - Keyboard registry, input bridge, focus flag, deferred scheduler
//! - [`pipeline`] - Terminal setup and the event loop that flushes deferred work
//! - [`error`] - Errors from the terminal side

pub mod error;
pub mod pipeline;
pub mod quick_search;
pub mod state;

// Re-export commonly used items
pub use error::{QuickSearchError, Result};

pub use quick_search::{
    attach, classify, Action, Disposition, PropValue, QuickSearch, QuickSearchHandle,
    QuickSearchProps, SearchPlacement,
};

pub use pipeline::{mount, run, tick, unmount, MountHandle};

pub use state::{
    // Keyboard
    KeyboardEvent, KeyState, Modifiers, KeyHandler,
    dispatch_keyboard, on_keyboard, last_event, last_key, reset_keyboard_state,
    // Focus
    FocusBinding,
    // Scheduler
    defer, flush, pending, reset_scheduler,
};
