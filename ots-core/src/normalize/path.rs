//! The tree ↔ paths bijection: depth-first path extraction and rebuild.

use crate::leaf::Leaf;
use crate::op::Op;
use crate::tree::Tree;

/// A single linear route from the tree's root to one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub ops: Vec<Op>,
    pub leaf: Leaf,
}

/// Depth-first enumeration of every path from `tree`'s root to a leaf.
pub fn tree_to_paths(tree: &Tree) -> Vec<Path> {
    let mut out = Vec::new();
    walk(tree, &[], &mut out);
    out
}

fn walk(tree: &Tree, prefix: &[Op], out: &mut Vec<Path>) {
    for leaf in tree.leaves.values() {
        out.push(Path {
            ops: prefix.to_vec(),
            leaf: leaf.clone(),
        });
    }
    for edge in tree.edges.values() {
        let mut ops = prefix.to_vec();
        ops.push(edge.op.clone());
        walk(&edge.subtree, &ops, out);
    }
}

/// Rebuilds a tree by folding each path from its leaf upward (wrapping each
/// subtree in a single-edge tree) and merging all paths together.
pub fn paths_to_tree(paths: &[Path]) -> Tree {
    let mut tree = Tree::new();
    for path in paths {
        let mut subtree = Tree::leaf(path.leaf.clone());
        for op in path.ops.iter().rev() {
            subtree = Tree::edge(op.clone(), subtree);
        }
        tree.merge_from(subtree);
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_two_leaf_tree() {
        let tree = Tree::edge(
            Op::Sha256,
            Tree::leaf(Leaf::Bitcoin(1)).merged(Tree::leaf(Leaf::Litecoin(2))),
        );
        let paths = tree_to_paths(&tree);
        assert_eq!(paths.len(), 2);
        let rebuilt = paths_to_tree(&paths);
        assert_eq!(rebuilt, tree);
    }
}
