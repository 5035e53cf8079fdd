//! Operations: the edges of a commitment tree, and their execution.

use std::cmp::Ordering;

use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

use crate::consts::{
    TAG_APPEND, TAG_HEXLIFY, TAG_KECCAK256, TAG_PREPEND, TAG_REVERSE, TAG_RIPEMD160, TAG_SHA1,
    TAG_SHA256,
};

/// A single transformation step in a commitment path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Sha1,
    Ripemd160,
    Sha256,
    Keccak256,
    Reverse,
    Hexlify,
    Append(Vec<u8>),
    Prepend(Vec<u8>),
}

impl Op {
    /// The single-byte wire tag for this operation's variant.
    pub fn tag(&self) -> u8 {
        match self {
            Op::Sha1 => TAG_SHA1,
            Op::Ripemd160 => TAG_RIPEMD160,
            Op::Sha256 => TAG_SHA256,
            Op::Keccak256 => TAG_KECCAK256,
            Op::Reverse => TAG_REVERSE,
            Op::Hexlify => TAG_HEXLIFY,
            Op::Append(_) => TAG_APPEND,
            Op::Prepend(_) => TAG_PREPEND,
        }
    }

    /// The operand carried by `append`/`prepend`, if any.
    pub fn operand(&self) -> Option<&[u8]> {
        match self {
            Op::Append(b) | Op::Prepend(b) => Some(b),
            _ => None,
        }
    }

    /// True for `append`/`prepend`, the only binary operations.
    pub fn is_binary(&self) -> bool {
        matches!(self, Op::Append(_) | Op::Prepend(_))
    }

    /// Canonical key string, per the data model table: `<type>` for unary
    /// operations, `<type>:<hex-operand>` for binary ones.
    pub fn canonical_key(&self) -> String {
        match self.operand() {
            Some(operand) => format!("{}:{}", self.name(), crate::bytes::to_hex(operand)),
            None => self.name().to_string(),
        }
    }

    /// The operation's name as used in `info` rendering (`sha256`, `append`,
    /// ...).
    pub fn name(&self) -> &'static str {
        match self {
            Op::Sha1 => "sha1",
            Op::Ripemd160 => "ripemd160",
            Op::Sha256 => "sha256",
            Op::Keccak256 => "keccak256",
            Op::Reverse => "reverse",
            Op::Hexlify => "hexlify",
            Op::Append(_) => "append",
            Op::Prepend(_) => "prepend",
        }
    }
}

impl PartialOrd for Op {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Op {
    /// First by tag byte numeric, then for append/prepend by operand
    /// lexicographic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag()
            .cmp(&other.tag())
            .then_with(|| match (self.operand(), other.operand()) {
                (Some(a), Some(b)) => crate::bytes::lex_cmp(a, b),
                _ => Ordering::Equal,
            })
    }
}

/// Applies a single operation to `msg`, producing the next message in the
/// commitment path.
pub fn call_op(op: &Op, msg: &[u8]) -> Vec<u8> {
    match op {
        Op::Sha1 => {
            use sha1::Digest as _;
            Sha1::digest(msg).to_vec()
        }
        Op::Ripemd160 => {
            use ripemd::Digest as _;
            Ripemd160::digest(msg).to_vec()
        }
        Op::Sha256 => {
            use sha2::Digest as _;
            Sha256::digest(msg).to_vec()
        }
        Op::Keccak256 => Keccak256::digest(msg).to_vec(),
        Op::Reverse => msg.iter().rev().copied().collect(),
        Op::Hexlify => crate::bytes::to_hex(msg).into_bytes(),
        Op::Append(operand) => crate::bytes::concat(msg, operand),
        Op::Prepend(operand) => crate::bytes::concat(operand, msg),
    }
}

/// Folds [`call_op`] over `ops`, left to right, starting from `msg`.
pub fn call_ops(ops: &[Op], msg: &[u8]) -> Vec<u8> {
    ops.iter().fold(msg.to_vec(), |acc, op| call_op(op, &acc))
}
