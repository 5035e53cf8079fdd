//! Bundled [`Verifier`] implementations backed by public block explorers.
//!
//! Bitcoin and Litecoin both speak the Esplora API (blockstream.info,
//! litecoinspace.org): look up the block at the leaf's height, compare its
//! merkle root — byte-reversed from the explorer's display order, same as
//! the chain's own internal hash order — against the attested message.
//! Ethereum has no merkle-root-over-arbitrary-data primitive to piggyback
//! on, so its verifier instead checks the attested message against the
//! block hash itself.

use std::time::Duration;

use serde::Deserialize;

use ots_core::leaf::Leaf;
use ots_core::verify::{VerificationResult, Verifier, VerifierError};

/// Verifies `bitcoin`/`litecoin` leaves against an Esplora-compatible block
/// explorer.
pub struct ExplorerVerifier {
    name: &'static str,
    chain: &'static str,
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct EsploraBlock {
    timestamp: u64,
    merkle_root: String,
}

impl ExplorerVerifier {
    pub fn bitcoin(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Self::new("bitcoin-explorer", "bitcoin", base_url, timeout)
    }

    pub fn litecoin(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Self::new("litecoin-explorer", "litecoin", base_url, timeout)
    }

    fn new(
        name: &'static str,
        chain: &'static str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            name,
            chain,
            base_url: base_url.into(),
            client,
        })
    }

    fn block_at(&self, height: u64) -> Result<EsploraBlock, VerifierError> {
        let other = |e: reqwest::Error| VerifierError::Other(e.to_string());

        let hash = self
            .client
            .get(format!("{}/block-height/{height}", self.base_url))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(other)?
            .text()
            .map_err(other)?;

        self.client
            .get(format!("{}/block/{}", self.base_url, hash.trim()))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(other)?
            .json::<EsploraBlock>()
            .map_err(other)
    }
}

impl Verifier for ExplorerVerifier {
    fn name(&self) -> &str {
        self.name
    }

    fn verify(&self, msg: &[u8], leaf: &Leaf) -> VerificationResult {
        let height = match (leaf.chain_name(), leaf.height()) {
            (Some(chain), Some(height)) if chain == self.chain => height,
            _ => return VerificationResult::Unsupported,
        };

        let block = match self.block_at(height) {
            Ok(block) => block,
            Err(err) => return VerificationResult::Error(err),
        };
        let mut root = match hex::decode(&block.merkle_root) {
            Ok(root) => root,
            Err(err) => return VerificationResult::Error(VerifierError::Other(err.to_string())),
        };
        root.reverse();

        if root == msg {
            VerificationResult::Confirmed(block.timestamp)
        } else {
            VerificationResult::Error(VerifierError::MerkleMismatch)
        }
    }
}

/// Verifies `ethereum` leaves by comparing the attested message against the
/// block hash returned by a BlockCypher-compatible explorer.
pub struct EthereumExplorerVerifier {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct BlockCypherBlock {
    hash: String,
    time: String,
}

impl EthereumExplorerVerifier {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn block_at(&self, height: u64) -> Result<BlockCypherBlock, VerifierError> {
        let other = |e: reqwest::Error| VerifierError::Other(e.to_string());
        self.client
            .get(format!("{}/blocks/{height}", self.base_url))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(other)?
            .json::<BlockCypherBlock>()
            .map_err(other)
    }
}

impl Verifier for EthereumExplorerVerifier {
    fn name(&self) -> &str {
        "ethereum-explorer"
    }

    fn verify(&self, msg: &[u8], leaf: &Leaf) -> VerificationResult {
        let Leaf::Ethereum(height) = leaf else {
            return VerificationResult::Unsupported;
        };

        let block = match self.block_at(*height) {
            Ok(block) => block,
            Err(err) => return VerificationResult::Error(err),
        };
        let hash = match hex::decode(block.hash.trim_start_matches("0x")) {
            Ok(hash) => hash,
            Err(err) => return VerificationResult::Error(VerifierError::Other(err.to_string())),
        };

        if hash == msg {
            match chrono::DateTime::parse_from_rfc3339(&block.time) {
                Ok(time) => VerificationResult::Confirmed(time.timestamp() as u64),
                Err(err) => VerificationResult::Error(VerifierError::Other(err.to_string())),
            }
        } else {
            VerificationResult::Error(VerifierError::MerkleMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn bitcoin_verifier_confirms_a_matching_merkle_root() {
        let server = MockServer::start().await;
        let reversed_root = hex::decode("aabbccdd").unwrap();
        let mut display_root = reversed_root.clone();
        display_root.reverse();

        Mock::given(method("GET"))
            .and(path("/block-height/100"))
            .respond_with(ResponseTemplate::new(200).set_body_string("blockhash123"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/block/blockhash123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timestamp": 1_600_000_000u64,
                "merkle_root": hex::encode(display_root),
            })))
            .mount(&server)
            .await;

        let base_url = server.uri();
        let result = tokio::task::spawn_blocking(move || {
            let verifier = ExplorerVerifier::bitcoin(base_url, Duration::from_secs(5)).unwrap();
            verifier.verify(&reversed_root, &Leaf::Bitcoin(100))
        })
        .await
        .unwrap();
        assert_eq!(result, VerificationResult::Confirmed(1_600_000_000));
    }

    #[tokio::test]
    async fn bitcoin_verifier_is_unsupported_for_other_chains() {
        let result = tokio::task::spawn_blocking(|| {
            let verifier =
                ExplorerVerifier::bitcoin("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
            verifier.verify(b"msg", &Leaf::Litecoin(1))
        })
        .await
        .unwrap();
        assert_eq!(result, VerificationResult::Unsupported);
    }
}
