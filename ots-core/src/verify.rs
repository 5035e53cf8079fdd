//! The verification contract: walk the tree executing operations, collect
//! reachable leaves with the message at that leaf, and drive each against
//! each configured [`Verifier`].
//!
//! Concrete verifiers (querying a Bitcoin/Litecoin/Ethereum block explorer)
//! are deliberately not implemented here — the core only defines the
//! contract. See `ots-client`'s `verifier` module for bundled
//! implementations.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::leaf::Leaf;
use crate::op::call_op;
use crate::tree::Tree;

/// A verifier's per-leaf outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// This verifier does not handle the leaf's attestation type.
    Unsupported,
    /// The attestation is confirmed; carries the block's UNIX timestamp.
    Confirmed(u64),
    /// The verifier attempted to check this leaf and failed.
    Error(VerifierError),
}

/// A verifier's failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// The computed Merkle root did not match the one found on-chain.
    #[error("merkle root mismatch")]
    MerkleMismatch,
    /// Any other verifier-specific failure (network, parsing, ...).
    #[error("{0}")]
    Other(String),
}

/// Something that can check whether `(msg, leaf)` is a genuine attestation.
///
/// Implementations must return [`VerificationResult::Unsupported`] exactly
/// when the leaf's attestation type is not one they handle (e.g. a Bitcoin
/// verifier given a Litecoin leaf) — a Merkle-root mismatch for a
/// *supported* type is always [`VerificationResult::Error`], never
/// `Unsupported`.
pub trait Verifier {
    /// This verifier's name, used to key [`VerificationReport`]'s maps.
    fn name(&self) -> &str;

    /// Checks one `(msg, leaf)` pair.
    fn verify(&self, msg: &[u8], leaf: &Leaf) -> VerificationResult;
}

/// Depth-first traversal collecting every leaf reachable from `tree`, paired
/// with the message obtained by applying every operation on the path to it.
pub fn get_leaves<'a>(msg: &[u8], tree: &'a Tree) -> Vec<(Vec<u8>, &'a Leaf)> {
    let mut out = Vec::new();
    collect(msg, tree, &mut out);
    out
}

fn collect<'a>(msg: &[u8], tree: &'a Tree, out: &mut Vec<(Vec<u8>, &'a Leaf)>) {
    for leaf in tree.leaves.values() {
        out.push((msg.to_vec(), leaf));
    }
    for edge in tree.edges.values() {
        let next_msg = call_op(&edge.op, msg);
        collect(&next_msg, &edge.subtree, out);
    }
}

/// Aggregated outcome of running every configured verifier against every
/// reachable leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// UNIX timestamp -> every verifier that confirmed an attestation at
    /// that time.
    pub attestations: BTreeMap<u64, Vec<String>>,
    /// Verifier name -> every per-leaf failure it reported.
    pub errors: BTreeMap<String, Vec<VerifierError>>,
}

impl VerificationReport {
    /// True if at least one verifier confirmed at least one attestation.
    pub fn is_verified(&self) -> bool {
        !self.attestations.is_empty()
    }
}

/// Runs every verifier in `verifiers` against every leaf reachable from
/// `tree` (starting at `msg`, the file hash), aggregating confirmations and
/// errors.
pub fn verify(msg: &[u8], tree: &Tree, verifiers: &[&dyn Verifier]) -> VerificationReport {
    let mut report = VerificationReport::default();
    for (leaf_msg, leaf) in get_leaves(msg, tree) {
        for verifier in verifiers {
            match verifier.verify(&leaf_msg, leaf) {
                VerificationResult::Unsupported => {}
                VerificationResult::Confirmed(time) => {
                    report
                        .attestations
                        .entry(time)
                        .or_default()
                        .push(verifier.name().to_string());
                }
                VerificationResult::Error(err) => {
                    report
                        .errors
                        .entry(verifier.name().to_string())
                        .or_default()
                        .push(err);
                }
            }
        }
    }
    report
}
