//! Error types for the **ots-core** crate.
//!
//! All fallible operations return [`crate::Result`], a convenient alias for
//! `core::result::Result<T, Error>`.
//!
//! The enum mirrors the taxonomy a detached-timestamp implementation needs:
//! codec failures are fatal to the read/write call that produced them, while
//! higher layers (workflows, verification) collect these per peer/verifier
//! rather than propagating them out of the whole operation.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// Reader ran past the end of the buffer.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A magic header or other expected literal was not found at the given
    /// position.
    #[error("literal mismatch at offset {offset}: expected {expected:02x?}, found {found:02x?}")]
    LiteralMismatch {
        offset: usize,
        expected: Vec<u8>,
        found: Vec<u8>,
    },

    /// Timestamp version is not one this library understands.
    #[error("unsupported version {0}")]
    UnsupportedVersion(u64),

    /// Operation tag byte does not correspond to a known operation.
    #[error("unknown operation tag 0x{0:02x}")]
    UnknownOperation(u8),

    /// File-hash algorithm tag byte does not correspond to a known algorithm.
    #[error("unknown file hash algorithm tag 0x{0:02x}")]
    UnknownAlgorithm(u8),

    /// A digest, URL length hint, or similar length-bearing field had an
    /// invalid size.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A calendar URL failed the grammar in the file-format spec.
    #[error("invalid calendar url: {0}")]
    InvalidUrl(String),

    /// An attestation payload had bytes left over after its defined shape was
    /// fully consumed.
    #[error("payload trailing garbage at offset {offset}")]
    PayloadTrailingGarbage { offset: usize },

    /// Bytes remained after a timestamp was fully parsed.
    #[error("trailing garbage: {0} byte(s) remaining")]
    TrailingGarbage(usize),

    /// A user-supplied value did not match the shape this library expects.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Convenient result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
