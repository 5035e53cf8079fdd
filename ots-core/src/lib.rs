//! ots-core: the binary codec, commitment tree model, normalization
//! pipeline, and verification contract behind the OpenTimestamps protocol.
//!
//! This crate is deliberately free of I/O: reading/writing happens over
//! in-memory buffers, and the stateful workflows that fan out to calendars
//! and block explorers live in `ots-client`.

pub mod bytes;
pub mod codec;
pub mod consts;
pub mod container;
pub mod error;
pub mod filehash;
pub mod info;
pub mod leaf;
pub mod normalize;
pub mod op;
pub mod predicate;
pub mod timestamp;
pub mod tree;
pub mod url;
pub mod verify;

pub use error::{Error, Result};
pub use filehash::{FileHash, HashAlgorithm};
pub use leaf::Leaf;
pub use op::Op;
pub use timestamp::Timestamp;
pub use tree::Tree;
pub use url::Url;
