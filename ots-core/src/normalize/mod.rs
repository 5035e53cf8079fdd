//! The normalization pipeline: tree ↔ paths, per-path operation
//! normalization, tree rebuild, coalescing, decoalescing.
//!
//! Composed as five separate, readable passes rather than one fused
//! recursive walk, per the design note in the source material: the
//! intermediate path lists make the round-trip and minimality properties
//! easy to state and test.

mod coalesce;
mod ops;
mod path;

pub use coalesce::{coalesce_operations, decoalesce_operations};
pub use ops::normalize_ops;
pub use path::{paths_to_tree, tree_to_paths, Path};

use crate::timestamp::Timestamp;

/// Rewrites `timestamp` into canonical, minimal-serialization form.
///
/// Returns `None` if the normalized tree is empty — per the data model's
/// invariant that a well-formed timestamp never contains one, so an empty
/// result means the timestamp must be rejected rather than returned.
pub fn normalize(timestamp: Timestamp) -> Option<Timestamp> {
    let paths: Vec<Path> = tree_to_paths(&timestamp.tree)
        .into_iter()
        .map(|p| Path {
            ops: normalize_ops(&p.ops),
            leaf: p.leaf,
        })
        .collect();

    let tree = paths_to_tree(&paths);
    let tree = coalesce_operations(tree);
    let tree = decoalesce_operations(tree);

    if tree.is_empty() {
        None
    } else {
        Some(Timestamp {
            version: timestamp.version,
            file_hash: timestamp.file_hash,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filehash::{FileHash, HashAlgorithm};
    use crate::leaf::Leaf;
    use crate::op::Op;
    use crate::tree::Tree;

    fn sample_timestamp(tree: Tree) -> Timestamp {
        Timestamp::new(
            FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap(),
            tree,
        )
    }

    #[test]
    fn normalize_is_idempotent() {
        let tree = Tree::edge(
            Op::Sha256,
            Tree::edge(Op::Append(b"abc".to_vec()), Tree::leaf(Leaf::Bitcoin(1))),
        );
        let once = normalize(sample_timestamp(tree)).unwrap();
        let twice = normalize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rejects_an_empty_tree() {
        assert!(normalize(sample_timestamp(Tree::new())).is_none());
    }
}
