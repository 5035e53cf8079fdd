//! Coalescing and decoalescing: undoing atomization where it is
//! length-saving, and splitting it back out where it would cost a byte.

use crate::bytes::concat;
use crate::op::Op;
use crate::tree::Tree;

/// Post-order pass: fuses a chain of single-outgoing-edge, zero-leaf nodes
/// of the same append/prepend kind into one edge with a concatenated
/// operand.
pub fn coalesce_operations(tree: Tree) -> Tree {
    let mut edges = Vec::new();
    for edge in tree.edges.values() {
        edges.push((
            edge.op.clone(),
            coalesce_operations((*edge.subtree).clone()),
        ));
    }

    let mut result = Tree::new();
    result.leaves = tree.leaves;
    for (op, subtree) in edges {
        result.insert_edge(op, subtree);
    }

    loop {
        if !result.leaves.is_empty() || result.edges.len() != 1 {
            break;
        }
        let outer = result.edges.values().next().unwrap().clone();
        if !outer.subtree.leaves.is_empty() || outer.subtree.edges.len() != 1 {
            break;
        }
        let inner = outer.subtree.edges.values().next().unwrap().clone();
        let fused_op = match (&outer.op, &inner.op) {
            (Op::Append(a), Op::Append(b)) => Op::Append(concat(a, b)),
            (Op::Prepend(a), Op::Prepend(b)) => Op::Prepend(concat(b, a)),
            _ => break,
        };
        let mut next = Tree::new();
        next.insert_edge(fused_op, (*inner.subtree).clone());
        result = next;
    }
    result
}

/// Post-order pass: when a single-byte outgoing edge leads to a zero-leaf
/// node with exactly two outgoing edges of the same kind as the parent,
/// splits the parent's one-byte operand into each child instead.
pub fn decoalesce_operations(tree: Tree) -> Tree {
    let mut result = Tree::new();
    result.leaves = tree.leaves;

    for edge in tree.edges.values() {
        let subtree = decoalesce_operations((*edge.subtree).clone());

        if let Some(split) = try_split(&edge.op, &subtree) {
            for (op, child) in split {
                result.insert_edge(op, child);
            }
            continue;
        }
        result.insert_edge(edge.op.clone(), subtree);
    }
    result
}

/// If `op` is a single-byte append/prepend whose subtree is a zero-leaf node
/// with exactly two edges of the same kind, returns the two edges with
/// `op`'s operand folded into each.
fn try_split(op: &Op, subtree: &Tree) -> Option<Vec<(Op, Tree)>> {
    let outer = op.operand()?;
    if outer.len() != 1 || !subtree.leaves.is_empty() || subtree.edges.len() != 2 {
        return None;
    }
    let children: Vec<_> = subtree.edges.values().cloned().collect();
    let same_kind = children.iter().all(|e| {
        matches!(
            (op, &e.op),
            (Op::Append(_), Op::Append(_)) | (Op::Prepend(_), Op::Prepend(_))
        )
    });
    if !same_kind {
        return None;
    }
    Some(
        children
            .into_iter()
            .map(|e| {
                let new_op = match (op, &e.op) {
                    (Op::Append(a), Op::Append(b)) => Op::Append(concat(a, b)),
                    (Op::Prepend(a), Op::Prepend(b)) => Op::Prepend(concat(b, a)),
                    _ => unreachable!("same_kind checked above"),
                };
                (new_op, (*e.subtree).clone())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::Leaf;

    #[test]
    fn coalesces_a_chain_of_single_byte_appends() {
        let tree = Tree::edge(
            Op::Append(vec![1]),
            Tree::edge(Op::Append(vec![2]), Tree::leaf(Leaf::Bitcoin(1))),
        );
        let coalesced = coalesce_operations(tree);
        assert_eq!(coalesced.edges.len(), 1);
        let edge = coalesced.edges.values().next().unwrap();
        assert_eq!(edge.op, Op::Append(vec![1, 2]));
    }

    #[test]
    fn coalesce_does_not_fuse_across_a_branch_point() {
        let branch = Tree::leaf(Leaf::Bitcoin(1)).merged(Tree::leaf(Leaf::Litecoin(2)));
        let tree = Tree::edge(Op::Append(vec![1]), branch);
        let coalesced = coalesce_operations(tree.clone());
        assert_eq!(coalesced, tree);
    }

    #[test]
    fn decoalesce_splits_a_one_byte_parent_into_a_same_kind_branch() {
        let branch = Tree::edge(Op::Prepend(vec![2]), Tree::leaf(Leaf::Bitcoin(1))).merged(
            Tree::edge(Op::Prepend(vec![3]), Tree::leaf(Leaf::Litecoin(2))),
        );
        let tree = Tree::edge(Op::Prepend(vec![1]), branch);
        let split = decoalesce_operations(tree);
        assert_eq!(split.edges.len(), 2);
        let ops: Vec<_> = split.edges.values().map(|e| e.op.clone()).collect();
        assert!(ops.contains(&Op::Prepend(vec![2, 1])));
        assert!(ops.contains(&Op::Prepend(vec![3, 1])));
    }

    #[test]
    fn coalesce_then_decoalesce_of_the_boundary_case_is_two_flat_prepends() {
        // One-byte outer prepend over two one-byte inner prepends of the
        // same sort must end as two flat prepends, not a coalesced-then-
        // split tower (spec.md's boundary behavior).
        let branch = Tree::edge(Op::Prepend(vec![0xaa]), Tree::leaf(Leaf::Bitcoin(1))).merged(
            Tree::edge(Op::Prepend(vec![0xbb]), Tree::leaf(Leaf::Litecoin(2))),
        );
        let tree = Tree::edge(Op::Prepend(vec![0x01]), branch);
        let result = decoalesce_operations(coalesce_operations(tree));
        assert_eq!(result.edges.len(), 2);
        for edge in result.edges.values() {
            assert_eq!(edge.op.operand().unwrap().len(), 2);
        }
    }
}
