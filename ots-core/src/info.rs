//! Human-readable rendering: pretty-prints a timestamp as a nested call-tree
//! of named verifications.

use crate::bytes::to_hex;
use crate::leaf::Leaf;
use crate::op::call_op;
use crate::timestamp::Timestamp;
use crate::tree::{Edge, Tree};

/// Renders `timestamp` as the multi-line string a human (or the `info`
/// subcommand) reads. `verbose` additionally prints the version comment and
/// the hex value of `msg` after every step.
pub fn render(timestamp: &Timestamp, verbose: bool) -> String {
    let mut lines = Vec::new();
    if verbose {
        lines.push(format!("# version: {}", timestamp.version));
    }
    lines.push(format!(
        "msg = {}(FILE)",
        timestamp.file_hash.algorithm.name()
    ));
    if verbose {
        lines.push(format!("    = {}", to_hex(&timestamp.file_hash.value)));
    }
    lines.extend(render_node(
        &timestamp.tree,
        &timestamp.file_hash.value,
        verbose,
    ));
    lines.join("\n")
}

fn render_node(tree: &Tree, msg: &[u8], verbose: bool) -> Vec<String> {
    let leaves = tree.sorted_leaves();
    let edges = tree.sorted_edges();
    let total = leaves.len() + edges.len();

    if total <= 1 {
        if let Some(leaf) = leaves.first() {
            return vec![render_leaf(leaf)];
        }
        if let Some(edge) = edges.first() {
            return render_edge(edge, msg, verbose);
        }
        return Vec::new();
    }

    let mut out = Vec::new();
    for leaf in leaves {
        out.extend(wrap_block(vec![render_leaf(leaf)]));
    }
    for edge in edges {
        out.extend(wrap_block(render_edge(edge, msg, verbose)));
    }
    out
}

fn render_edge(edge: &Edge, msg: &[u8], verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(match edge.op.operand() {
        Some(operand) => format!("msg = {}(msg, {})", edge.op.name(), to_hex(operand)),
        None => format!("msg = {}(msg)", edge.op.name()),
    });
    let next_msg = call_op(&edge.op, msg);
    if verbose {
        lines.push(format!("    = {}", to_hex(&next_msg)));
    }
    lines.extend(render_node(&edge.subtree, &next_msg, verbose));
    lines
}

fn render_leaf(leaf: &Leaf) -> String {
    match leaf {
        Leaf::Bitcoin(h) => format!("bitcoinVerify(msg, {h})"),
        Leaf::Litecoin(h) => format!("litecoinVerify(msg, {h})"),
        Leaf::Ethereum(h) => format!("ethereumVerify(msg, {h})"),
        Leaf::Pending(url) => format!("pendingVerify(msg, {url})"),
        Leaf::Unknown { header, payload } => {
            format!(
                "unknownVerify<{}>(msg, {})",
                to_hex(header),
                to_hex(payload)
            )
        }
    }
}

/// Prefixes a multi-line block with ` -> ` on its first line and four
/// spaces on every continuation line, as a branch under a multi-child node.
fn wrap_block(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!(" -> {line}")
            } else {
                format!("    {line}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filehash::{FileHash, HashAlgorithm};

    #[test]
    fn renders_single_leaf_inline() {
        let ts = Timestamp::new(
            FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap(),
            Tree::leaf(Leaf::Bitcoin(123)),
        );
        let out = render(&ts, false);
        assert_eq!(out, "msg = sha1(FILE)\nbitcoinVerify(msg, 123)");
    }

    #[test]
    fn renders_branching_node_with_arrows() {
        let tree = Tree::leaf(Leaf::Bitcoin(1)).merged(Tree::leaf(Leaf::Litecoin(2)));
        let ts = Timestamp::new(
            FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap(),
            tree,
        );
        let out = render(&ts, false);
        assert!(out.contains(" -> bitcoinVerify(msg, 1)"));
        assert!(out.contains(" -> litecoinVerify(msg, 2)"));
    }
}
