//! The top-level value this crate revolves around: a file hash plus the
//! commitment tree anchoring it in time.

use crate::filehash::FileHash;
use crate::tree::Tree;

/// The only version this library understands.
pub const CURRENT_VERSION: u64 = 1;

/// A parsed or constructed detached timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub version: u64,
    pub file_hash: FileHash,
    pub tree: Tree,
}

impl Timestamp {
    /// Builds a new timestamp at the current version.
    pub fn new(file_hash: FileHash, tree: Tree) -> Self {
        Self {
            version: CURRENT_VERSION,
            file_hash,
            tree,
        }
    }
}
