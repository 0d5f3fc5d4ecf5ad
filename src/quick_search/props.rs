//! Quick search props - attach options.
//!
//! Props support static values, signals, and getters for reactivity,
//! the same way component props do.

use std::rc::Rc;
use spark_signals::Signal;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Read on every use, so a host signal or getter can change it at any time.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Presentation hints
// =============================================================================

/// Where the host shows its search field. Passed through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchPlacement {
    #[default]
    Automatic,
    Toolbar,
    Sidebar,
    NavigationBar,
}

// =============================================================================
// Quick Search Props
// =============================================================================

/// Options for attaching quick search to a scope.
///
/// # Example
///
/// ```ignore
/// use spark_quick_search::{attach, QuickSearchProps, PropValue};
/// use spark_signals::signal;
///
/// let query = signal(String::new());
/// let enabled = signal(true);
///
/// let handle = attach(QuickSearchProps {
///     enabled: PropValue::Signal(enabled.clone()),
///     prompt: Some("Type to search".to_string()),
///     ..QuickSearchProps::new(query.clone())
/// });
/// ```
#[derive(Clone)]
pub struct QuickSearchProps {
    /// Text being searched for (two-way bound signal, owned by the host).
    pub text: Signal<String>,

    /// When false every key event is ignored (default: true).
    pub enabled: PropValue<bool>,

    /// Host-owned focus flag. When `None` the scope keeps its own.
    pub focus: Option<Signal<bool>>,

    /// Search field placement hint (not interpreted here).
    pub placement: SearchPlacement,

    /// Search field prompt (not interpreted here).
    pub prompt: Option<String>,
}

impl QuickSearchProps {
    /// Props with defaults for everything but the text binding.
    pub fn new(text: Signal<String>) -> Self {
        Self {
            text,
            enabled: PropValue::Static(true),
            focus: None,
            placement: SearchPlacement::default(),
            prompt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;
    use std::cell::Cell;

    #[test]
    fn test_defaults() {
        let props = QuickSearchProps::new(signal(String::new()));
        assert!(props.enabled.get());
        assert!(props.focus.is_none());
        assert_eq!(props.placement, SearchPlacement::Automatic);
        assert!(props.prompt.is_none());
    }

    #[test]
    fn test_prop_value_sources() {
        assert!(!PropValue::Static(false).get());

        let flag = signal(true);
        let prop: PropValue<bool> = flag.clone().into();
        assert!(prop.get());
        flag.set(false);
        assert!(!prop.get());

        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let getter = PropValue::Getter(Rc::new(move || {
            calls_clone.set(calls_clone.get() + 1);
            true
        }));
        getter.get();
        getter.get();
        assert_eq!(calls.get(), 2);
    }
}
