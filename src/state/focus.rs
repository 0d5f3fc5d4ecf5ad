//! Focus System - Which flag owns the hidden input surface's focus
//!
//! A quick-search scope keeps a focus flag for the hidden surface that
//! receives typed keys. The host may hand in its own flag (for example one
//! shared with a visible search field); otherwise the scope owns one.
//! Exactly one of them is written to.
//!
//! The scope only ever *requests* focus. Losing focus happens outside
//! (the user moves elsewhere) and is observed, not reverted.
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::state::focus::FocusBinding;
//! use spark_signals::signal;
//!
//! let host_flag = signal(false);
//! let binding = FocusBinding::resolve(Some(host_flag.clone()));
//!
//! binding.focus();
//! assert!(host_flag.get());
//! ```

use spark_signals::{signal, Signal};

// =============================================================================
// FOCUS BINDING
// =============================================================================

/// The authoritative focus flag of a quick-search scope.
#[derive(Clone)]
pub enum FocusBinding {
    /// Flag owned by the scope. Starts unfocused.
    Internal(Signal<bool>),
    /// Flag supplied and owned by the host.
    External(Signal<bool>),
}

impl FocusBinding {
    /// Pick the host's flag when one is supplied, otherwise create our own.
    pub fn resolve(handle: Option<Signal<bool>>) -> Self {
        match handle {
            Some(flag) => FocusBinding::External(flag),
            None => FocusBinding::Internal(signal(false)),
        }
    }

    /// Request focus for the hidden input surface.
    ///
    /// Writes `true` to the authoritative flag only. Never reads the flag,
    /// so calling this from an effect does not subscribe to focus changes.
    pub fn focus(&self) {
        self.signal().set(true);
    }

    /// Whether the hidden input surface currently holds focus.
    pub fn is_focused(&self) -> bool {
        self.signal().get()
    }

    /// The flag itself, for binding a focusable surface to it.
    pub fn signal(&self) -> &Signal<bool> {
        match self {
            FocusBinding::Internal(flag) | FocusBinding::External(flag) => flag,
        }
    }

    /// Whether the host supplied the flag.
    pub fn is_external(&self) -> bool {
        matches!(self, FocusBinding::External(_))
    }
}

impl std::fmt::Debug for FocusBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_external() { "External" } else { "Internal" };
        f.debug_struct("FocusBinding")
            .field("kind", &kind)
            .field("focused", &self.is_focused())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_internal_starts_unfocused() {
        let binding = FocusBinding::resolve(None);
        assert!(!binding.is_external());
        assert!(!binding.is_focused());

        binding.focus();
        assert!(binding.is_focused());
    }

    #[test]
    fn test_external_is_written_through() {
        let host = signal(false);
        let binding = FocusBinding::resolve(Some(host.clone()));
        assert!(binding.is_external());

        binding.focus();
        assert!(host.get());
    }

    #[test]
    fn test_external_unfocus_is_observed() {
        let host = signal(false);
        let binding = FocusBinding::resolve(Some(host.clone()));

        binding.focus();
        host.set(false);
        assert!(!binding.is_focused());
    }

    #[test]
    fn test_focus_from_effect_does_not_track_flag() {
        let binding = FocusBinding::resolve(None);
        let trigger = signal(0);

        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let trigger_clone = trigger.clone();
        let focus = binding.clone();
        let _stop = effect(move || {
            let _ = trigger_clone.get();
            runs_clone.set(runs_clone.get() + 1);
            focus.focus();
        });
        assert_eq!(runs.get(), 1);
        assert!(binding.is_focused());

        // Blurring from outside must not re-run the effect.
        binding.signal().set(false);
        assert_eq!(runs.get(), 1);
        assert!(!binding.is_focused());

        trigger.set(1);
        assert_eq!(runs.get(), 2);
        assert!(binding.is_focused());
    }
}
