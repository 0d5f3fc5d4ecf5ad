//! Error types for the terminal pipeline.
//!
//! Quick-search editing never fails: rejected keystrokes surface as
//! [`Disposition::Ignored`](crate::quick_search::Disposition). Only the
//! terminal side (raw mode, event polling) can produce errors.

use std::io;
use thiserror::Error;

/// Errors that can occur while driving the terminal event loop.
#[derive(Error, Debug)]
pub enum QuickSearchError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to {action} terminal")]
    Terminal {
        action: &'static str,
        #[source]
        source: io::Error,
    },
}

impl QuickSearchError {
    pub(crate) fn terminal(action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Terminal { action, source }
    }
}

/// Result alias used by the pipeline.
pub type Result<T> = std::result::Result<T, QuickSearchError>;
