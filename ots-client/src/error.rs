//! Error types for the networking/workflow layer.
//!
//! Workflows do not fail outright on a single calendar or explorer error —
//! see [`crate::workflow::WorkflowError`] for the per-remote error collected
//! alongside a best-effort result. This type is for outright failures: a
//! malformed local timestamp, or a transport error with no remote left to
//! try.

use thiserror::Error;

/// Client crate error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A codec or tree-shape error from the underlying timestamp.
    #[error(transparent)]
    Core(#[from] ots_core::Error),

    /// The HTTP transport itself failed (DNS, TLS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A remote answered but not with a timestamp we can use.
    #[error("remote {url} returned {status}: {body}")]
    Remote {
        url: String,
        status: u16,
        body: String,
    },

    /// No remote produced a usable result.
    #[error("no remote succeeded")]
    NoRemoteSucceeded,
}

/// Convenient result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
