//! Quick search controller.
//!
//! Turns key events delivered to a scope into edits on a host-owned text
//! signal, and keeps the hidden input surface focused whenever the text
//! becomes empty.
//!
//! Appends and deletes run on the next scheduler turn instead of inside
//! the dispatch that delivered the key. Some hosts will not re-deliver an
//! auto-repeated key while the previous delivery's side effects are still
//! pending, so editing in place would drop repeats of a held key. Clear
//! happens immediately; Escape is not held down.
//!
//! # Example
//!
//! ```ignore
//! use spark_quick_search::{attach, QuickSearchProps};
//! use spark_quick_search::state::{keyboard, scheduler};
//! use spark_signals::signal;
//!
//! let query = signal(String::new());
//! let handle = attach(QuickSearchProps::new(query.clone()));
//!
//! keyboard::dispatch(keyboard::KeyboardEvent::char('h'));
//! scheduler::flush();
//! assert_eq!(query.get(), "h");
//!
//! handle.cleanup();
//! ```

use std::cell::Cell;
use std::rc::{Rc, Weak};

use spark_signals::{effect, Signal};
use unicode_segmentation::UnicodeSegmentation;

use crate::state::focus::FocusBinding;
use crate::state::keyboard::{self, KeyboardEvent};
use crate::state::scheduler;
use super::classify::{classify, Action};
use super::props::{PropValue, QuickSearchProps, SearchPlacement};

// =============================================================================
// Disposition
// =============================================================================

/// What happened to a key event offered to quick search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The key was taken; stop propagating it.
    Handled,
    /// The key was not for us; let the host keep propagating it.
    Ignored,
}

impl Disposition {
    pub fn is_handled(self) -> bool {
        self == Disposition::Handled
    }
}

// =============================================================================
// Controller
// =============================================================================

struct Inner {
    text: Signal<String>,
    enabled: PropValue<bool>,
    focus: FocusBinding,
    placement: SearchPlacement,
    prompt: Option<String>,
    detached: Cell<bool>,
}

/// Quick search state for one scope.
///
/// Cheap to clone; clones share the same scope.
#[derive(Clone)]
pub struct QuickSearch {
    inner: Rc<Inner>,
}

impl QuickSearch {
    /// Create a controller. The focus flag is resolved here, once.
    pub fn new(props: QuickSearchProps) -> Self {
        let QuickSearchProps {
            text,
            enabled,
            focus,
            placement,
            prompt,
        } = props;

        Self {
            inner: Rc::new(Inner {
                text,
                enabled,
                focus: FocusBinding::resolve(focus),
                placement,
                prompt,
                detached: Cell::new(false),
            }),
        }
    }

    /// Offer a key event to quick search.
    pub fn handle(&self, event: &KeyboardEvent) -> Disposition {
        if !self.is_enabled() || !event.is_key_down() {
            return Disposition::Ignored;
        }

        let disposition = match classify(event) {
            Action::Ignore => Disposition::Ignored,
            Action::Append(literal) => {
                self.defer_edit(move |text| {
                    let mut value = text.get();
                    value.push_str(&literal);
                    text.set(value);
                });
                Disposition::Handled
            }
            Action::DeleteLast => {
                if self.inner.text.get().is_empty() {
                    Disposition::Ignored
                } else {
                    // The text may have emptied by the time this runs.
                    self.defer_edit(|text| {
                        if let Some(shorter) = without_last_grapheme(&text.get()) {
                            text.set(shorter);
                        }
                    });
                    Disposition::Handled
                }
            }
            Action::Clear => {
                if self.inner.text.get().is_empty() {
                    Disposition::Ignored
                } else {
                    self.inner.text.set(String::new());
                    Disposition::Handled
                }
            }
        };

        tracing::debug!(key = %event.key, ?disposition, "quick search key");
        disposition
    }

    /// The scope became active: give the hidden input surface focus.
    pub fn activate(&self) {
        self.inner.focus.focus();
    }

    /// Re-focus whenever the text becomes empty, whoever emptied it.
    ///
    /// Returns a function that stops following.
    pub fn follow_text(&self) -> Box<dyn FnOnce()> {
        let text = self.inner.text.clone();
        let focus = self.inner.focus.clone();

        // Only the text is read here, so an external blur never re-runs this.
        let stop = effect(move || {
            if text.get().is_empty() {
                tracing::debug!("text emptied, focusing quick search input");
                focus.focus();
            }
        });
        Box::new(stop)
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.inner.text.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    pub fn is_focused(&self) -> bool {
        self.inner.focus.is_focused()
    }

    /// The authoritative focus flag (the host's, if one was supplied).
    pub fn focus_signal(&self) -> &Signal<bool> {
        self.inner.focus.signal()
    }

    pub fn placement(&self) -> SearchPlacement {
        self.inner.placement
    }

    pub fn prompt(&self) -> Option<&str> {
        self.inner.prompt.as_deref()
    }

    /// Turn pending and future deferred edits into no-ops.
    pub fn detach(&self) {
        self.inner.detached.set(true);
    }

    pub fn is_detached(&self) -> bool {
        self.inner.detached.get()
    }

    /// Run `edit` on the next scheduler turn, unless the scope is gone by then.
    fn defer_edit<F>(&self, edit: F)
    where
        F: FnOnce(&Signal<String>) + 'static,
    {
        let scope: Weak<Inner> = Rc::downgrade(&self.inner);
        scheduler::defer(move || {
            let Some(inner) = scope.upgrade() else {
                return;
            };
            if inner.detached.get() {
                return;
            }
            edit(&inner.text);
        });
    }
}

/// `value` without its last user-perceived character, or `None` if empty.
fn without_last_grapheme(value: &str) -> Option<String> {
    let (start, _) = value.grapheme_indices(true).next_back()?;
    Some(value[..start].to_string())
}

// =============================================================================
// Attach
// =============================================================================

/// Quick search attached to a scope. Detaches on `cleanup` or drop.
///
/// Do not drop it from inside a keyboard handler; the handler registry is
/// borrowed while handlers run.
#[must_use = "quick search detaches when the handle is dropped"]
pub struct QuickSearchHandle {
    controller: QuickSearch,
    stop_keys: Option<Box<dyn FnOnce()>>,
    stop_follow: Option<Box<dyn FnOnce()>>,
}

impl QuickSearchHandle {
    pub fn controller(&self) -> &QuickSearch {
        &self.controller
    }

    /// Detach quick search from the scope.
    ///
    /// This will:
    /// 1. Stop capturing key events
    /// 2. Stop following the text
    /// 3. Cancel deferred edits that have not run yet
    pub fn cleanup(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_keys.take() {
            stop();
        }
        if let Some(stop) = self.stop_follow.take() {
            stop();
        }
        self.controller.detach();
    }
}

impl Drop for QuickSearchHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Attach quick search to the current scope.
///
/// Captures every unmodified key-down event offered to the keyboard
/// registry, follows the text signal, and focuses the hidden input surface
/// right away.
pub fn attach(props: QuickSearchProps) -> QuickSearchHandle {
    let controller = QuickSearch::new(props);

    let stop_follow = controller.follow_text();
    controller.activate();

    let for_keys = controller.clone();
    let stop_keys = keyboard::on(move |event| for_keys.handle(event).is_handled());

    tracing::debug!(
        external_focus = controller.inner.focus.is_external(),
        "quick search attached"
    );

    QuickSearchHandle {
        controller,
        stop_keys: Some(Box::new(stop_keys)),
        stop_follow: Some(stop_follow),
    }
}

// =============================================================================
// Tests
// =============================================================================
