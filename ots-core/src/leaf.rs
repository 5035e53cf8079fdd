//! Leaves: the terminal attestations of a commitment tree.

use std::cmp::Ordering;

use crate::bytes::{lex_cmp, to_hex};
use crate::consts::{HEADER_BITCOIN, HEADER_ETHEREUM, HEADER_LITECOIN, HEADER_PENDING};
use crate::container::Merge;
use crate::url::Url;

/// A terminal attestation. `Bitcoin`/`Litecoin`/`Ethereum` carry the block
/// height the commitment is anchored at; `Pending` names a calendar to
/// later [`upgrade`](crate) against; `Unknown` preserves any attestation
/// type this build does not recognise, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Leaf {
    Bitcoin(u64),
    Litecoin(u64),
    Ethereum(u64),
    Pending(Url),
    Unknown { header: [u8; 8], payload: Vec<u8> },
}

impl Leaf {
    /// The 8-byte attestation header identifying this leaf's type.
    pub fn header(&self) -> [u8; 8] {
        match self {
            Leaf::Bitcoin(_) => HEADER_BITCOIN,
            Leaf::Litecoin(_) => HEADER_LITECOIN,
            Leaf::Ethereum(_) => HEADER_ETHEREUM,
            Leaf::Pending(_) => HEADER_PENDING,
            Leaf::Unknown { header, .. } => *header,
        }
    }

    /// Canonical key string, per the data model table.
    pub fn canonical_key(&self) -> String {
        match self {
            Leaf::Bitcoin(h) => format!("bitcoin:{h}"),
            Leaf::Litecoin(h) => format!("litecoin:{h}"),
            Leaf::Ethereum(h) => format!("ethereum:{h}"),
            Leaf::Pending(url) => format!("pending:{}", url.as_str()),
            Leaf::Unknown { header, payload } => {
                format!("unknown:{}:{}", to_hex(header), to_hex(payload))
            }
        }
    }

    /// True if this is a `pending` leaf.
    pub fn is_pending(&self) -> bool {
        matches!(self, Leaf::Pending(_))
    }

    /// The chain name, for leaves anchored on a chain (`None` for
    /// pending/unknown).
    pub fn chain_name(&self) -> Option<&'static str> {
        match self {
            Leaf::Bitcoin(_) => Some("bitcoin"),
            Leaf::Litecoin(_) => Some("litecoin"),
            Leaf::Ethereum(_) => Some("ethereum"),
            _ => None,
        }
    }

    /// This leaf's height, for chain-anchored leaves.
    pub fn height(&self) -> Option<u64> {
        match self {
            Leaf::Bitcoin(h) | Leaf::Litecoin(h) | Leaf::Ethereum(h) => Some(*h),
            _ => None,
        }
    }
}

impl PartialOrd for Leaf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Leaf {
    /// First by 8-byte header (lexicographic), then: pending by URL text,
    /// unknown by payload, chain leaves by height (numeric).
    fn cmp(&self, other: &Self) -> Ordering {
        self.header()
            .cmp(&other.header())
            .then_with(|| match (self, other) {
                (Leaf::Pending(a), Leaf::Pending(b)) => a.as_str().cmp(b.as_str()),
                (Leaf::Unknown { payload: a, .. }, Leaf::Unknown { payload: b, .. }) => {
                    lex_cmp(a, b)
                }
                _ => self.height().cmp(&other.height()),
            })
    }
}

impl Merge for Leaf {
    type Key = Leaf;

    fn merge_key(&self) -> Self::Key {
        self.clone()
    }

    /// Leaves merge left-biased: the incumbent wins, the newcomer is
    /// dropped. Since two leaves only ever collide when they are already
    /// structurally identical (the key *is* the leaf), this never actually
    /// discards information.
    fn merge_combine(self, _other: Self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keys_match_table() {
        assert_eq!(Leaf::Bitcoin(123).canonical_key(), "bitcoin:123");
        assert_eq!(
            Leaf::Pending(Url::parse("https://a.example/cal").unwrap()).canonical_key(),
            "pending:https://a.example/cal"
        );
    }

    #[test]
    fn ordering_by_header_then_height() {
        let a = Leaf::Bitcoin(1);
        let b = Leaf::Bitcoin(2);
        assert!(a < b);
        // Litecoin header byte 0x06 > Bitcoin header byte 0x05
        assert!(Leaf::Bitcoin(1000) < Leaf::Litecoin(1));
    }
}
