//! ots-client: the HTTP-driven half of the OpenTimestamps protocol —
//! submitting digests to a calendar pool, polling for upgrades, shrinking a
//! multi-chain timestamp, and bundled block-explorer verifiers.
//!
//! `ots-core` stays free of I/O; this crate owns every network call.

pub mod calendar;
pub mod config;
pub mod error;
pub mod verifier;
pub mod workflow;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
