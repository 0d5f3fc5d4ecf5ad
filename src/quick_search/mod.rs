//! Quick search - type into a search field without focusing it first.
//!
//! Key events delivered to a scope are classified ([`classify`]) and
//! applied to a host-owned text signal by a [`QuickSearch`] controller.
//! [`attach`] wires a controller into the keyboard registry and keeps the
//! hidden input surface focused whenever the text is empty.

pub mod classify;
pub mod controller;
pub mod props;

pub use classify::{classify, Action};
pub use controller::{attach, Disposition, QuickSearch, QuickSearchHandle};
pub use props::{PropValue, QuickSearchProps, SearchPlacement};
