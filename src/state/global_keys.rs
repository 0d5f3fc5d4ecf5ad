//! Global Keys Module - Application-wide shortcuts
//!
//! Ctrl+C stops the event loop. Registered on mount and cleaned up on
//! unmount. It must be registered before any quick-search scope so the
//! shortcut is seen first (quick search ignores modified keys anyway).
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::state::global_keys;
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = global_keys::setup_global_keys(running.clone());
//!
//! // Later, on cleanup:
//! handle.cleanup();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::keyboard::{self, Modifiers};

/// Cleanup handle for global key handlers
pub struct GlobalKeysHandle {
    ctrl_c_cleanup: Option<Box<dyn FnOnce()>>,
}

impl GlobalKeysHandle {
    /// Clean up all global key handlers
    pub fn cleanup(mut self) {
        if let Some(cleanup) = self.ctrl_c_cleanup.take() {
            cleanup();
        }
    }
}

/// Set up global key handlers.
/// Returns a handle for cleanup.
///
/// - **Ctrl+C**: Sets `running` to false for graceful shutdown
pub fn setup_global_keys(running: Arc<AtomicBool>) -> GlobalKeysHandle {
    let ctrl_c_cleanup = keyboard::on(move |event| {
        if event.modifiers.contains(Modifiers::CTRL) && event.key.eq_ignore_ascii_case("c") {
            tracing::debug!("ctrl+c pressed, stopping");
            running.store(false, Ordering::SeqCst);
            true
        } else {
            false
        }
    });

    GlobalKeysHandle {
        ctrl_c_cleanup: Some(Box::new(ctrl_c_cleanup)),
    }
}
