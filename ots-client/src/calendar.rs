//! A single calendar server: digest submission and commitment polling.
//!
//! Calendars speak a tiny binary protocol over HTTPS: `POST /digest` with
//! the raw digest bytes returns a serialized **tree** (not a full detached
//! timestamp — no magic header, version, or file hash in front of it)
//! committing that digest to a pending attestation (and, once the
//! calendar's own aggregation has happened, directly to a chain); `GET
//! /timestamp/<hex commitment>` polls for the upgrade of a previously
//! submitted pending attestation, returning a tree in the same bare shape.
//! Both endpoints are sent the `Accept: application/vnd.opentimestamps.v1`
//! header spec.md §6 requires.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};

use ots_core::codec;
use ots_core::Tree;

use crate::error::{Error, Result};

const ACCEPT_HEADER: &str = "application/vnd.opentimestamps.v1";

/// Thin async client bound to one calendar's base URL.
#[derive(Clone)]
pub struct CalendarClient {
    base_url: String,
    client: reqwest::Client,
}

impl CalendarClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Submits a (fudged) digest for timestamping, returning the tree
    /// fragment the calendar hands back (typically a single `pending` or
    /// chain leaf).
    pub async fn submit(&self, digest: &[u8]) -> Result<Tree> {
        let url = format!("{}/digest", self.base_url);
        tracing::debug!(url = %url, "submitting digest to calendar");
        let resp = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER))
            .body(digest.to_vec())
            .send()
            .await?;
        let result = self.parse_tree_response(&url, resp).await;
        if let Err(ref err) = result {
            tracing::warn!(url = %url, %err, "calendar submission failed");
        }
        result
    }

    /// Polls the calendar for the upgrade of a previously submitted
    /// commitment (the digest handed to a prior `submit`, or an
    /// intermediate message reached by walking a pending leaf's edges).
    pub async fn upgrade(&self, commitment: &[u8]) -> Result<Tree> {
        let url = format!("{}/timestamp/{}", self.base_url, hex::encode(commitment));
        tracing::debug!(url = %url, "polling calendar for upgrade");
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER))
            .send()
            .await?;
        let result = self.parse_tree_response(&url, resp).await;
        if let Err(ref err) = result {
            tracing::warn!(url = %url, %err, "calendar upgrade poll failed");
        }
        result
    }

    async fn parse_tree_response(&self, url: &str, resp: reqwest::Response) -> Result<Tree> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(Error::Remote {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        codec::read_tree(&bytes).map_err(Error::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ots_core::codec::write_tree_bytes;
    use ots_core::{FileHash, HashAlgorithm, Leaf};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_tree() -> Tree {
        Tree::leaf(Leaf::Pending(
            ots_core::Url::parse("https://cal.example/path").unwrap(),
        ))
    }

    #[tokio::test]
    async fn submit_parses_a_successful_response() {
        let server = MockServer::start().await;
        let tree = sample_tree();
        Mock::given(method("POST"))
            .and(path("/digest"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(write_tree_bytes(&tree)))
            .mount(&server)
            .await;

        let client = CalendarClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let got = client.submit(b"some digest").await.unwrap();
        assert_eq!(got, tree);
    }

    #[tokio::test]
    async fn submit_surfaces_remote_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/digest"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = CalendarClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let file_hash = FileHash::new(HashAlgorithm::Sha256, vec![1u8; 32]).unwrap();
        let err = client.submit(&file_hash.value).await.unwrap_err();
        assert!(matches!(err, Error::Remote { status: 503, .. }));
    }
}
