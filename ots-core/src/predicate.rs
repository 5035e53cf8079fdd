//! Pure predicates over a timestamp's tree, used to gate the workflows in
//! `ots-client` before they make any remote call.

use crate::leaf::Leaf;
use crate::timestamp::Timestamp;

/// At least one leaf on `chain` AND at least one other leaf (a different
/// chain, or pending) — shrinking to `chain` would be a no-op otherwise.
pub fn can_shrink(timestamp: &Timestamp, chain: &str) -> bool {
    let leaves = timestamp.tree.all_leaves();
    let on_chain = leaves.iter().any(|l| l.chain_name() == Some(chain));
    let other = leaves.iter().any(|l| l.chain_name() != Some(chain));
    on_chain && other
}

/// At least one `pending` leaf anywhere in the tree.
pub fn can_upgrade(timestamp: &Timestamp) -> bool {
    timestamp.tree.has_pending()
}

/// At least one non-`pending` leaf anywhere in the tree.
pub fn can_verify(timestamp: &Timestamp) -> bool {
    timestamp.tree.has_non_pending()
}

/// The minimum-height leaf on `chain`, if any (ties break toward the first
/// encountered in canonical order, i.e. the first minimum found while
/// walking leaves in their `Ord` order).
pub fn cheapest_on_chain<'a>(timestamp: &'a Timestamp, chain: &str) -> Option<&'a Leaf> {
    let mut leaves = timestamp.tree.all_leaves();
    leaves.retain(|l| l.chain_name() == Some(chain));
    leaves.sort();
    leaves
        .into_iter()
        .min_by_key(|l| l.height().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filehash::{FileHash, HashAlgorithm};
    use crate::tree::Tree;

    fn ts(tree: Tree) -> Timestamp {
        Timestamp::new(
            FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap(),
            tree,
        )
    }

    #[test]
    fn can_shrink_requires_another_leaf_besides_the_chain() {
        assert!(!can_shrink(&ts(Tree::leaf(Leaf::Bitcoin(1))), "bitcoin"));
        let two = Tree::leaf(Leaf::Bitcoin(1)).merged(Tree::leaf(Leaf::Litecoin(2)));
        assert!(can_shrink(&ts(two), "bitcoin"));
    }

    #[test]
    fn cheapest_on_chain_picks_minimum_height() {
        let tree = Tree::leaf(Leaf::Bitcoin(500))
            .merged(Tree::leaf(Leaf::Bitcoin(100)))
            .merged(Tree::leaf(Leaf::Litecoin(1)));
        let t = ts(tree);
        assert_eq!(cheapest_on_chain(&t, "bitcoin"), Some(&Leaf::Bitcoin(100)));
    }
}
