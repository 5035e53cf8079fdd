//! Binary codec for detached timestamp files: a byte-exact, recursive,
//! tagged, variable-length format.

pub mod reader;
pub mod writer;

pub use reader::{read, read_tree, Reader};
pub use writer::{write, write_tree, write_tree_bytes};
