//! The algorithm + digest pair a timestamp commits to.

use crate::consts::{ALGO_KECCAK256, ALGO_RIPEMD160, ALGO_SHA1, ALGO_SHA256};
use crate::error::{Error, Result};

/// The hash algorithm a [`FileHash`] was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Ripemd160,
    Sha256,
    Keccak256,
}

impl HashAlgorithm {
    /// Wire tag for this algorithm.
    pub fn tag(self) -> u8 {
        match self {
            HashAlgorithm::Sha1 => ALGO_SHA1,
            HashAlgorithm::Ripemd160 => ALGO_RIPEMD160,
            HashAlgorithm::Sha256 => ALGO_SHA256,
            HashAlgorithm::Keccak256 => ALGO_KECCAK256,
        }
    }

    /// Digest length in bytes this algorithm requires.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 | HashAlgorithm::Ripemd160 => 20,
            HashAlgorithm::Sha256 | HashAlgorithm::Keccak256 => 32,
        }
    }

    /// Resolves a wire tag byte to an algorithm.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            ALGO_SHA1 => Ok(HashAlgorithm::Sha1),
            ALGO_RIPEMD160 => Ok(HashAlgorithm::Ripemd160),
            ALGO_SHA256 => Ok(HashAlgorithm::Sha256),
            ALGO_KECCAK256 => Ok(HashAlgorithm::Keccak256),
            other => Err(Error::UnknownAlgorithm(other)),
        }
    }

    /// Lowercase name, as used in `info` rendering (`msg = sha256(FILE)`).
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Ripemd160 => "ripemd160",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Keccak256 => "keccak256",
        }
    }

    /// Computes this algorithm's digest of `msg`.
    pub fn digest(self, msg: &[u8]) -> Vec<u8> {
        let op = match self {
            HashAlgorithm::Sha1 => crate::op::Op::Sha1,
            HashAlgorithm::Ripemd160 => crate::op::Op::Ripemd160,
            HashAlgorithm::Sha256 => crate::op::Op::Sha256,
            HashAlgorithm::Keccak256 => crate::op::Op::Keccak256,
        };
        crate::op::call_op(&op, msg)
    }
}

/// The (algorithm, digest) pair a [`crate::timestamp::Timestamp`] commits to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHash {
    pub algorithm: HashAlgorithm,
    pub value: Vec<u8>,
}

impl FileHash {
    /// Builds a `FileHash`, validating the digest length against
    /// `algorithm`'s requirement (20 bytes for sha1/ripemd160, 32 for
    /// sha256/keccak256).
    pub fn new(algorithm: HashAlgorithm, value: Vec<u8>) -> Result<Self> {
        let expected = algorithm.digest_len();
        if value.len() != expected {
            return Err(Error::InvalidLength(format!(
                "{} digest must be {} bytes, got {}",
                algorithm.name(),
                expected,
                value.len()
            )));
        }
        Ok(Self { algorithm, value })
    }

    /// Computes the file hash of `data` under `algorithm`.
    pub fn compute(algorithm: HashAlgorithm, data: &[u8]) -> Self {
        let value = algorithm.digest(data);
        Self { algorithm, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        assert!(FileHash::new(HashAlgorithm::Sha256, vec![0u8; 20]).is_err());
        assert!(FileHash::new(HashAlgorithm::Sha1, vec![0u8; 20]).is_ok());
    }

    #[test]
    fn from_tag_round_trips() {
        for algo in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Ripemd160,
            HashAlgorithm::Sha256,
            HashAlgorithm::Keccak256,
        ] {
            assert_eq!(HashAlgorithm::from_tag(algo.tag()).unwrap(), algo);
        }
    }
}
