//! Mount API - Terminal lifecycle and event loop.
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::pipeline::mount;
//!
//! let handle = mount::mount()?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&handle)? {
//!     // Your logic here (redraw, etc.)
//! }
//!
//! handle.unmount();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::state::{global_keys, input, scheduler};
use super::terminal::TerminalSetup;

/// How long one tick waits for input (~60fps).
pub const TICK_TIMEOUT: Duration = Duration::from_millis(16);

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds:
/// - The terminal setup (restored on unmount or drop)
/// - The running flag (set to false on Ctrl+C or unmount)
/// - The global keys handle (for cleanup)
pub struct MountHandle {
    terminal: TerminalSetup,
    running: Arc<AtomicBool>,
    global_keys: Option<global_keys::GlobalKeysHandle>,
}

impl MountHandle {
    /// Stop the event loop and restore the terminal.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.global_keys.take() {
            handle.cleanup();
        }

        if let Err(err) = self.terminal.exit() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    /// Use this to trigger graceful shutdown from custom code.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the terminal reports key repeat events.
    pub fn reports_key_repeats(&self) -> bool {
        self.terminal.reports_key_repeats()
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal.
///
/// This sets up:
/// 1. Raw mode, alternate screen and (when supported) key repeat reporting
/// 2. Terminal size detection
/// 3. Global key handlers (Ctrl+C for shutdown)
///
/// Attach quick search after mounting so Ctrl+C is seen first.
pub fn mount() -> Result<MountHandle> {
    let mut terminal = TerminalSetup::new();
    terminal.enter()?;

    let running = Arc::new(AtomicBool::new(true));
    let global_keys_handle = global_keys::setup_global_keys(running.clone());

    tracing::info!(
        key_repeats = terminal.reports_key_repeats(),
        "terminal mounted"
    );

    Ok(MountHandle {
        terminal,
        running,
        global_keys: Some(global_keys_handle),
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// Waits up to [`TICK_TIMEOUT`] for an input event, routes it, then runs
/// the work deferred by earlier handlers. Returns `Ok(false)` once the
/// application should stop.
pub fn tick(handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    if let Some(event) = input::poll_event(TICK_TIMEOUT)? {
        input::route_event(event);
    }
    scheduler::flush();

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
///
/// This function blocks until:
/// - Ctrl+C is pressed (sets running to false)
/// - `handle.stop()` is called from a handler
pub fn run(handle: &MountHandle) -> Result<()> {
    while tick(handle)? {}
    Ok(())
}
