//! Runtime configuration for the calendar/explorer fan-out.
//!
//! [`Config`] centralises the calendar URL list, HTTP timeout, and the block
//! explorer endpoints used by the bundled verifiers. It is constructed via
//! [`ConfigBuilder`] using the fluent builder pattern, so callers can
//! customise only the fields they care about while keeping sensible
//! defaults.
//!
//! ```
//! use ots_client::config::Config;
//!
//! let cfg = Config::default();
//! assert!(!cfg.calendar_urls.is_empty());
//! ```

use std::time::Duration;

/// The calendars queried by the public OpenTimestamps aggregator pool.
const DEFAULT_CALENDARS: &[&str] = &[
    "https://alice.btc.calendar.opentimestamps.org",
    "https://bob.btc.calendar.opentimestamps.org",
    "https://finney.calendar.eternitywall.com",
];

/// Runtime configuration shared by the submit/upgrade/shrink workflows.
///
/// `calendar_urls` are plain base URLs for outbound HTTP requests, not
/// [`ots_core::Url`] — that type enforces the narrower grammar a `pending`
/// leaf's embedded URL must satisfy on the wire, which is a stricter and
/// unrelated constraint from where this crate happens to send requests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Calendars to submit digests to and poll for attestations.
    pub calendar_urls: Vec<String>,

    /// Per-request HTTP timeout.
    pub timeout: Duration,

    /// Block explorer base URL used by the bundled Bitcoin verifier.
    pub bitcoin_explorer_url: String,

    /// Block explorer base URL used by the bundled Litecoin verifier.
    pub litecoin_explorer_url: String,

    /// Block explorer base URL used by the bundled Ethereum verifier.
    pub ethereum_explorer_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar_urls: DEFAULT_CALENDARS.iter().map(|u| u.to_string()).collect(),
            timeout: Duration::from_secs(10),
            bitcoin_explorer_url: "https://blockstream.info/api".into(),
            litecoin_explorer_url: "https://litecoinspace.org/api".into(),
            ethereum_explorer_url: "https://api.blockcypher.com/v1/eth/main".into(),
        }
    }
}

/// Fluent builder for [`Config`].
pub struct ConfigBuilder {
    inner: Config,
}

impl ConfigBuilder {
    /// Starts a new builder pre-populated with [`Config::default`].
    pub fn new() -> Self {
        Self {
            inner: Config::default(),
        }
    }

    /// Replaces the calendar list wholesale.
    pub fn calendar_urls(mut self, urls: Vec<String>) -> Self {
        self.inner.calendar_urls = urls;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner.timeout = timeout;
        self
    }

    pub fn bitcoin_explorer_url<S: Into<String>>(mut self, url: S) -> Self {
        self.inner.bitcoin_explorer_url = url.into();
        self
    }

    pub fn litecoin_explorer_url<S: Into<String>>(mut self, url: S) -> Self {
        self.inner.litecoin_explorer_url = url.into();
        self
    }

    pub fn ethereum_explorer_url<S: Into<String>>(mut self, url: S) -> Self {
        self.inner.ethereum_explorer_url = url.into();
        self
    }

    /// Consumes the builder returning an immutable configuration value.
    pub fn finish(self) -> Config {
        self.inner
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
