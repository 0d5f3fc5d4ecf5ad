//! Terminal Pipeline
//!
//! Owns the terminal and the event loop that feeds key events to the
//! keyboard registry.
//!
//! ```text
//! crossterm event → input::route_event → keyboard handlers → scheduler::flush
//! ```
//!
//! Each tick flushes the deferred queue after routing, so work a handler
//! defers runs on the following turn, never inside the dispatch itself.

pub mod mount;
pub mod terminal;

pub use mount::{mount, run, tick, unmount, MountHandle};
pub use terminal::{
    detect_terminal_size, set_terminal_size, terminal_height, terminal_size, terminal_width,
    TerminalSetup,
};
