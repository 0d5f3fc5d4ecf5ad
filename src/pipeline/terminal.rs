//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, the alternate screen, and the
//! keyboard enhancement protocol that makes terminals report key repeats.
//! Also tracks the terminal size as a signal.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    self as ct_terminal, EnterAlternateScreen, LeaveAlternateScreen,
};
use spark_signals::{signal, Signal};

use crate::error::{QuickSearchError, Result};

// =============================================================================
// Terminal Size
// =============================================================================

thread_local! {
    static TERMINAL_SIZE: Signal<(u16, u16)> = signal((80, 24));
}

/// Current terminal size as (width, height).
pub fn terminal_size() -> (u16, u16) {
    TERMINAL_SIZE.with(|s| s.get())
}

/// Terminal width in columns.
pub fn terminal_width() -> u16 {
    terminal_size().0
}

/// Terminal height in rows.
pub fn terminal_height() -> u16 {
    terminal_size().1
}

/// Update the stored terminal size (on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_SIZE.with(|s| s.set((width, height)));
}

/// Read the real terminal size, keeping the stored one if that fails.
pub fn detect_terminal_size() {
    match ct_terminal::size() {
        Ok((w, h)) => set_terminal_size(w, h),
        Err(err) => tracing::warn!(%err, "could not read terminal size"),
    }
}

// =============================================================================
// Terminal Setup
// =============================================================================

/// Terminal setup/teardown handle.
#[derive(Debug, Default)]
pub struct TerminalSetup {
    is_raw: bool,
    is_fullscreen: bool,
    keyboard_enhanced: bool,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// Keyboard enhancement (repeat and release reporting) is enabled when
    /// the terminal supports it; without it, held keys still arrive as
    /// repeated presses.
    pub fn enter(&mut self) -> Result<()> {
        ct_terminal::enable_raw_mode().map_err(QuickSearchError::terminal("enable raw mode on"))?;
        self.is_raw = true;

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)
            .map_err(QuickSearchError::terminal("enter alternate screen on"))?;
        self.is_fullscreen = true;

        match ct_terminal::supports_keyboard_enhancement() {
            Ok(true) => {
                let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
                match execute!(out, PushKeyboardEnhancementFlags(flags)) {
                    Ok(()) => self.keyboard_enhanced = true,
                    Err(err) => tracing::warn!(%err, "keyboard enhancement unavailable"),
                }
            }
            Ok(false) => tracing::debug!("terminal does not report key repeats"),
            Err(err) => tracing::warn!(%err, "could not query keyboard enhancement"),
        }

        detect_terminal_size();
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    ///
    /// Every restore step is attempted even if an earlier one fails; the
    /// first failure is returned.
    pub fn exit(&mut self) -> Result<()> {
        self.restore(
            || {
                let mut out = io::stdout();
                execute!(out, PopKeyboardEnhancementFlags)
            },
            || {
                let mut out = io::stdout();
                execute!(out, Show, LeaveAlternateScreen)
            },
            ct_terminal::disable_raw_mode,
        )?;
        io::stdout().flush()?;
        Ok(())
    }

    /// Run the restore steps for whatever is still active. Each flag is
    /// cleared before its step runs, so a failed step is never retried.
    fn restore(
        &mut self,
        pop_keyboard: impl FnOnce() -> io::Result<()>,
        leave_screen: impl FnOnce() -> io::Result<()>,
        disable_raw: impl FnOnce() -> io::Result<()>,
    ) -> Result<()> {
        let mut first_err = None;

        if std::mem::take(&mut self.keyboard_enhanced) {
            if let Err(err) = pop_keyboard() {
                first_err.get_or_insert(QuickSearchError::terminal("pop keyboard flags on")(err));
            }
        }
        if std::mem::take(&mut self.is_fullscreen) {
            if let Err(err) = leave_screen() {
                first_err.get_or_insert(QuickSearchError::terminal("leave alternate screen on")(err));
            }
        }
        if std::mem::take(&mut self.is_raw) {
            if let Err(err) = disable_raw() {
                first_err.get_or_insert(QuickSearchError::terminal("disable raw mode on")(err));
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_raw
    }

    /// Whether the terminal reports repeat/release events.
    pub fn reports_key_repeats(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
