//! The three stateful workflows: submit a fresh digest to a pool of
//! calendars, upgrade a partially-pending timestamp, and shrink a
//! multi-chain timestamp down to its cheapest attestation on one chain.
//!
//! `submit` and `upgrade` fan out over HTTP and never fail outright on a
//! single calendar's error — each remote's failure is collected into the
//! returned [`WorkflowError`] list alongside whatever partial result the
//! other remotes produced. `shrink` is a pure local tree rewrite and has no
//! remote to fail against.

use std::time::Duration;

use futures::future::{join_all, BoxFuture, FutureExt};
use rand::RngCore;
use thiserror::Error;

use ots_core::bytes::concat;
use ots_core::normalize::{normalize, paths_to_tree, tree_to_paths};
use ots_core::op::call_op;
use ots_core::{predicate, FileHash, HashAlgorithm, Leaf, Op, Timestamp, Tree};

use crate::calendar::CalendarClient;
use crate::config::Config;
use crate::error::{Error, Result};

/// One remote's failure during a fan-out workflow.
#[derive(Debug, Error)]
#[error("calendar {url} failed: {source}")]
pub struct WorkflowError {
    pub url: String,
    #[source]
    pub source: Error,
}

/// Submits `file_hash` to every calendar in `config`, merging whatever
/// subset of them answer successfully under one common `sha256` edge, and
/// wrapping that under an outer `append(fudge)` edge when the fudge is
/// nonempty.
///
/// `fudge`: `None` draws 16 random bytes (the default, so the calendar
/// cannot correlate the submitter across timestamps); `Some(bytes)` —
/// including `Some(vec![])` — uses exactly those bytes, for deterministic
/// tests.
pub async fn submit(
    file_hash: FileHash,
    fudge: Option<Vec<u8>>,
    config: &Config,
) -> (Timestamp, Vec<WorkflowError>) {
    let fudge = fudge.unwrap_or_else(random_fudge);
    let fudged_value = HashAlgorithm::Sha256.digest(&concat(&file_hash.value, &fudge));

    let attempts = config
        .calendar_urls
        .iter()
        .map(|url| submit_one(url, &fudged_value, config.timeout));
    let results = join_all(attempts).await;

    let mut calendar_tree = Tree::new();
    let mut errors = Vec::new();
    for (url, result) in config.calendar_urls.iter().zip(results) {
        match result {
            Ok(tree) => calendar_tree.merge_from(tree),
            Err(source) => errors.push(WorkflowError {
                url: url.clone(),
                source,
            }),
        }
    }

    let mut tree = Tree::edge(Op::Sha256, calendar_tree);
    if !fudge.is_empty() {
        tree = Tree::edge(Op::Append(fudge), tree);
    }
    (Timestamp::new(file_hash, tree), errors)
}

/// Draws 16 random bytes of fudge from the process RNG.
fn random_fudge() -> Vec<u8> {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut buf);
    buf.to_vec()
}

async fn submit_one(url: &str, fudged_value: &[u8], timeout: Duration) -> Result<Tree> {
    let client = CalendarClient::new(url, timeout)?;
    client.submit(fudged_value).await
}

/// Polls every `pending` leaf's calendar for an upgrade, replacing each one
/// that has attested with whatever the calendar returns, then re-normalizes
/// the combined tree.
pub async fn upgrade(mut timestamp: Timestamp, config: &Config) -> (Timestamp, Vec<WorkflowError>) {
    let msg = timestamp.file_hash.value.clone();
    let (tree, errors) = upgrade_tree(msg, timestamp.tree, config).await;
    timestamp.tree = tree;
    let upgraded = normalize(timestamp.clone()).unwrap_or(timestamp);
    (upgraded, errors)
}

fn upgrade_tree(
    msg: Vec<u8>,
    tree: Tree,
    config: &Config,
) -> BoxFuture<'_, (Tree, Vec<WorkflowError>)> {
    async move {
        let Tree { leaves, edges } = tree;
        let mut errors = Vec::new();
        let mut out = Tree::new();

        for leaf in leaves.into_values() {
            match &leaf {
                Leaf::Pending(url) => match upgrade_one(url, &msg, config.timeout).await {
                    Ok(fetched) => out.merge_from(fetched),
                    Err(source) => {
                        errors.push(WorkflowError {
                            url: url.as_str().to_string(),
                            source,
                        });
                        out.insert_leaf(leaf);
                    }
                },
                _ => out.insert_leaf(leaf),
            }
        }

        for edge in edges.into_values() {
            let next_msg = call_op(&edge.op, &msg);
            let (subtree, sub_errors) = upgrade_tree(next_msg, *edge.subtree, config).await;
            errors.extend(sub_errors);
            out.insert_edge(edge.op, subtree);
        }

        (out, errors)
    }
    .boxed()
}

async fn upgrade_one(url: &ots_core::Url, msg: &[u8], timeout: Duration) -> Result<Tree> {
    let client = CalendarClient::new(url.as_str(), timeout)?;
    client.upgrade(msg).await
}

/// Prunes `timestamp` down to the single path reaching its cheapest
/// attestation on `chain`, discarding every other branch.
///
/// If no leaf on `chain` exists, returns `timestamp` unchanged (spec.md's
/// shrink algorithm: "If none exists, return the timestamp unchanged").
/// This is only meaningful when [`predicate::can_shrink`] is true; when it
/// isn't (the chain's leaf is the timestamp's only attestation), the
/// single-path rebuild below is a no-op that reproduces the same tree, so
/// there is nothing to special-case.
pub fn shrink(timestamp: Timestamp, chain: &str) -> Result<Timestamp> {
    let Some(cheapest) = predicate::cheapest_on_chain(&timestamp, chain).cloned() else {
        return Ok(timestamp);
    };

    let path = tree_to_paths(&timestamp.tree)
        .into_iter()
        .find(|p| p.leaf == cheapest)
        .expect("cheapest leaf was read from this timestamp's own tree");

    let tree = paths_to_tree(std::slice::from_ref(&path));
    Ok(Timestamp {
        version: timestamp.version,
        file_hash: timestamp.file_hash,
        tree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ots_core::codec::write_tree_bytes;
    use ots_core::{HashAlgorithm, Leaf};
    use wiremock::matchers::{method, path as path_matcher};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn file_hash() -> FileHash {
        FileHash::new(HashAlgorithm::Sha256, vec![9u8; 32]).unwrap()
    }

    #[tokio::test]
    async fn submit_merges_responses_from_every_calendar() {
        let server_a = MockServer::start().await;
        let server_b = MockServer::start().await;
        let fh = file_hash();

        let tree_a = Tree::leaf(Leaf::Bitcoin(1));
        let tree_b = Tree::leaf(Leaf::Litecoin(2));

        for (server, tree) in [(&server_a, &tree_a), (&server_b, &tree_b)] {
            Mock::given(method("POST"))
                .and(path_matcher("/digest"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(write_tree_bytes(tree)))
                .mount(server)
                .await;
        }

        let config = Config {
            calendar_urls: vec![server_a.uri(), server_b.uri()],
            ..Config::default()
        };

        let (merged, errors) = submit(fh, Some(vec![]), &config).await;
        assert!(errors.is_empty());
        assert_eq!(merged.tree.all_leaves().len(), 2);
        // merged under one common sha256 edge, no outer append (fudge empty)
        assert_eq!(merged.tree.edges.len(), 1);
        let edge = merged.tree.edges.values().next().unwrap();
        assert_eq!(edge.op, Op::Sha256);
    }

    /// spec.md S5: empty fudge, one calendar, mocked response is a single
    /// bitcoin leaf at height 123 -> one `sha256` edge to that leaf, no
    /// outer `append` edge.
    #[tokio::test]
    async fn submit_with_empty_fudge_wraps_under_a_bare_sha256_edge() {
        let server = MockServer::start().await;
        let calendar_tree_bytes: &[u8] = &[
            0x00, 0x05, 0x88, 0x96, 0x0d, 0x73, 0xd7, 0x19, 0x01, 0x01, 0x7b,
        ];
        Mock::given(method("POST"))
            .and(path_matcher("/digest"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(calendar_tree_bytes))
            .mount(&server)
            .await;

        let fh = FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap();
        let config = Config {
            calendar_urls: vec![server.uri()],
            ..Config::default()
        };

        let (ts, errors) = submit(fh, Some(vec![]), &config).await;
        assert!(errors.is_empty());
        assert_eq!(ts.tree.edges.len(), 1);
        let edge = ts.tree.edges.values().next().unwrap();
        assert_eq!(edge.op, Op::Sha256);
        assert_eq!(edge.subtree.leaves.len(), 1);
        assert_eq!(
            edge.subtree.leaves.values().next().unwrap(),
            &Leaf::Bitcoin(123)
        );
    }

    #[tokio::test]
    async fn submit_collects_errors_from_failing_calendars_but_keeps_the_rest() {
        let good = MockServer::start().await;
        let bad = MockServer::start().await;
        let fh = file_hash();
        let tree = Tree::leaf(Leaf::Bitcoin(1));

        Mock::given(method("POST"))
            .and(path_matcher("/digest"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(write_tree_bytes(&tree)))
            .mount(&good)
            .await;
        Mock::given(method("POST"))
            .and(path_matcher("/digest"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&bad)
            .await;

        let config = Config {
            calendar_urls: vec![good.uri(), bad.uri()],
            ..Config::default()
        };

        let (merged, errors) = submit(fh, Some(vec![]), &config).await;
        assert_eq!(errors.len(), 1);
        assert_eq!(merged.tree.all_leaves().len(), 1);
    }

    #[tokio::test]
    async fn submit_with_no_fudge_given_wraps_under_a_random_append_edge() {
        let server = MockServer::start().await;
        let calendar_tree_bytes: &[u8] = &[
            0x00, 0x05, 0x88, 0x96, 0x0d, 0x73, 0xd7, 0x19, 0x01, 0x01, 0x7b,
        ];
        Mock::given(method("POST"))
            .and(path_matcher("/digest"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(calendar_tree_bytes))
            .mount(&server)
            .await;

        let fh = FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).unwrap();
        let config = Config {
            calendar_urls: vec![server.uri()],
            ..Config::default()
        };

        let (ts, errors) = submit(fh, None, &config).await;
        assert!(errors.is_empty());
        assert_eq!(ts.tree.edges.len(), 1);
        let outer = ts.tree.edges.values().next().unwrap();
        match &outer.op {
            Op::Append(fudge) => assert_eq!(fudge.len(), 16),
            other => panic!("expected an outer append edge, got {other:?}"),
        }
        assert_eq!(outer.subtree.edges.len(), 1);
        assert_eq!(outer.subtree.edges.values().next().unwrap().op, Op::Sha256);
    }

    #[tokio::test]
    async fn upgrade_replaces_an_attested_pending_leaf() {
        let server = MockServer::start().await;
        let fh = file_hash();
        let pending_url = ots_core::Url::new_unchecked(server.uri());

        let attested = Tree::leaf(Leaf::Bitcoin(42));
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(write_tree_bytes(&attested)))
            .mount(&server)
            .await;

        let pending = Timestamp::new(fh.clone(), Tree::leaf(Leaf::Pending(pending_url)));
        let config = Config::default();
        let (upgraded, errors) = upgrade(pending, &config).await;
        assert!(errors.is_empty());
        assert_eq!(upgraded.tree.all_leaves(), vec![&Leaf::Bitcoin(42)]);
    }

    #[test]
    fn shrink_keeps_only_the_cheapest_leaf_on_chain() {
        let fh = file_hash();
        let tree = Tree::leaf(Leaf::Bitcoin(500))
            .merged(Tree::leaf(Leaf::Bitcoin(100)))
            .merged(Tree::leaf(Leaf::Litecoin(1)));
        let ts = Timestamp::new(fh, tree);

        let shrunk = shrink(ts, "bitcoin").unwrap();
        assert_eq!(shrunk.tree.all_leaves(), vec![&Leaf::Bitcoin(100)]);
    }

    #[test]
    fn shrink_is_a_no_op_when_the_chain_leaf_is_the_only_attestation() {
        let fh = file_hash();
        let ts = Timestamp::new(fh, Tree::leaf(Leaf::Bitcoin(1)));
        let shrunk = shrink(ts.clone(), "bitcoin").unwrap();
        assert_eq!(shrunk, ts);
    }

    #[test]
    fn shrink_returns_timestamp_unchanged_when_no_leaf_on_chain_exists() {
        let fh = file_hash();
        let ts = Timestamp::new(fh, Tree::leaf(Leaf::Litecoin(1)));
        let shrunk = shrink(ts.clone(), "bitcoin").unwrap();
        assert_eq!(shrunk, ts);
    }
}
