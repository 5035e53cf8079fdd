//! Cursor-based reader for the detached-timestamp wire format.

use crate::consts::{
    HEADER_BITCOIN, HEADER_ETHEREUM, HEADER_LITECOIN, HEADER_PENDING, MAGIC_HEADER, TAG_APPEND,
    TAG_HEXLIFY, TAG_KECCAK256, TAG_LEAF, TAG_NON_FINAL, TAG_PREPEND, TAG_REVERSE, TAG_RIPEMD160,
    TAG_SHA1, TAG_SHA256,
};
use crate::error::{Error, Result};
use crate::filehash::{FileHash, HashAlgorithm};
use crate::leaf::Leaf;
use crate::op::Op;
use crate::timestamp::{Timestamp, CURRENT_VERSION};
use crate::tree::Tree;
use crate::url::Url;

/// A cursor over an immutable byte buffer, with one method per grammar rule
/// in the file format.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

/// Either a leaf record or an operation edge, as read by
/// [`Reader::read_edge_or_leaf`].
enum EdgeOrLeaf {
    Leaf(Leaf),
    Edge(Op, Tree),
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset, for error reporting.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Advances past `n` bytes and returns them.
    pub fn get_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof { offset: self.pos });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advances past a single byte and returns it.
    pub fn get_byte(&mut self) -> Result<u8> {
        Ok(self.get_bytes(1)?[0])
    }

    /// The next byte without consuming it, or `None` at end of input.
    fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Consumes and asserts the next bytes equal `expected`.
    pub fn read_literal(&mut self, expected: &[u8]) -> Result<()> {
        let start = self.pos;
        let found = self.get_bytes(expected.len())?;
        if found == expected {
            Ok(())
        } else {
            Err(Error::LiteralMismatch {
                offset: start,
                expected: expected.to_vec(),
                found: found.to_vec(),
            })
        }
    }

    /// Reads a little-endian base-128 varint: 7 payload bits per byte, MSB
    /// set means a continuation byte follows.
    ///
    /// Overflow policy: a value that would require a 10th continuation byte
    /// (i.e. >= 2^63) is rejected with [`Error::InvalidLength`] rather than
    /// silently wrapping. This is a deliberate, documented choice — the
    /// source format has no explicit bound.
    pub fn read_uint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            if shift >= 63 {
                return Err(Error::InvalidLength(format!(
                    "varint at offset {start} exceeds the 2^63 range"
                )));
            }
            let byte = self.get_byte()?;
            let payload = (byte & 0x7f) as u64;
            value |= payload << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Reads `<uint length><length octets>`.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_uint()? as usize;
        Ok(self.get_bytes(len)?.to_vec())
    }

    /// Reads a length-prefixed byte string, decodes it as ASCII text, and
    /// validates it against the calendar URL grammar.
    pub fn read_url(&mut self) -> Result<Url> {
        let bytes = self.read_bytes()?;
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::InvalidUrl("not valid UTF-8/ASCII".to_string()))?;
        if !text.is_ascii() {
            return Err(Error::InvalidUrl(text));
        }
        Url::parse(text)
    }

    /// Reads one algorithm tag byte followed by its fixed-length digest.
    pub fn read_file_hash(&mut self) -> Result<FileHash> {
        let tag = self.get_byte()?;
        let algorithm = HashAlgorithm::from_tag(tag)?;
        let value = self.get_bytes(algorithm.digest_len())?.to_vec();
        FileHash::new(algorithm, value)
    }

    /// Reads the version varint and accepts only [`CURRENT_VERSION`].
    pub fn read_version(&mut self) -> Result<u64> {
        let version = self.read_uint()?;
        if version != CURRENT_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        Ok(version)
    }

    /// Reads an 8-byte attestation header and its length-prefixed payload,
    /// dispatching on the header to produce the right [`Leaf`] variant.
    pub fn read_leaf(&mut self) -> Result<Leaf> {
        let header_bytes = self.get_bytes(8)?;
        let mut header = [0u8; 8];
        header.copy_from_slice(header_bytes);
        let payload = self.read_bytes()?;

        if header == HEADER_BITCOIN || header == HEADER_LITECOIN || header == HEADER_ETHEREUM {
            let mut inner = Reader::new(&payload);
            let height = inner.read_uint()?;
            if inner.remaining() != 0 {
                return Err(Error::PayloadTrailingGarbage {
                    offset: inner.position(),
                });
            }
            return Ok(match header {
                h if h == HEADER_BITCOIN => Leaf::Bitcoin(height),
                h if h == HEADER_LITECOIN => Leaf::Litecoin(height),
                _ => Leaf::Ethereum(height),
            });
        }

        if header == HEADER_PENDING {
            let mut inner = Reader::new(&payload);
            let url = inner.read_url()?;
            if inner.remaining() != 0 {
                return Err(Error::PayloadTrailingGarbage {
                    offset: inner.position(),
                });
            }
            return Ok(Leaf::Pending(url));
        }

        Ok(Leaf::Unknown { header, payload })
    }

    /// Reads one tag byte and dispatches to a leaf record, a recursive
    /// operation edge, or `UnknownOperation`.
    fn read_edge_or_leaf(&mut self) -> Result<EdgeOrLeaf> {
        let tag = self.get_byte()?;
        match tag {
            TAG_LEAF => Ok(EdgeOrLeaf::Leaf(self.read_leaf()?)),
            TAG_SHA1 => Ok(EdgeOrLeaf::Edge(Op::Sha1, self.read_tree()?)),
            TAG_RIPEMD160 => Ok(EdgeOrLeaf::Edge(Op::Ripemd160, self.read_tree()?)),
            TAG_SHA256 => Ok(EdgeOrLeaf::Edge(Op::Sha256, self.read_tree()?)),
            TAG_KECCAK256 => Ok(EdgeOrLeaf::Edge(Op::Keccak256, self.read_tree()?)),
            TAG_REVERSE => Ok(EdgeOrLeaf::Edge(Op::Reverse, self.read_tree()?)),
            TAG_HEXLIFY => Ok(EdgeOrLeaf::Edge(Op::Hexlify, self.read_tree()?)),
            TAG_APPEND => {
                let operand = self.read_bytes()?;
                Ok(EdgeOrLeaf::Edge(Op::Append(operand), self.read_tree()?))
            }
            TAG_PREPEND => {
                let operand = self.read_bytes()?;
                Ok(EdgeOrLeaf::Edge(Op::Prepend(operand), self.read_tree()?))
            }
            other => Err(Error::UnknownOperation(other)),
        }
    }

    /// Reads zero or more `<0xff><item>` groups followed by one final item.
    pub fn read_tree(&mut self) -> Result<Tree> {
        let mut tree = Tree::new();
        while self.peek_byte() == Some(TAG_NON_FINAL) {
            self.pos += 1;
            Self::insert(&mut tree, self.read_edge_or_leaf()?);
        }
        Self::insert(&mut tree, self.read_edge_or_leaf()?);
        Ok(tree)
    }

    fn insert(tree: &mut Tree, item: EdgeOrLeaf) {
        match item {
            EdgeOrLeaf::Leaf(leaf) => tree.insert_leaf(leaf),
            EdgeOrLeaf::Edge(op, subtree) => tree.insert_edge(op, subtree),
        }
    }
}

/// Parses a complete detached timestamp file, normalizing the result.
///
/// Fails with [`Error::TrailingGarbage`] if bytes remain after the tree, and
/// with [`Error::ValidationError`] if normalization rejects the tree as
/// empty.
pub fn read(buf: &[u8]) -> Result<Timestamp> {
    let mut reader = Reader::new(buf);
    reader.read_literal(&MAGIC_HEADER)?;
    let version = reader.read_version()?;
    let file_hash = reader.read_file_hash()?;
    let tree = reader.read_tree()?;
    if reader.remaining() != 0 {
        return Err(Error::TrailingGarbage(reader.remaining()));
    }
    let timestamp = Timestamp {
        version,
        file_hash,
        tree,
    };
    crate::normalize::normalize(timestamp)
        .ok_or_else(|| Error::ValidationError("timestamp normalizes to an empty tree".to_string()))
}

/// Parses a bare, un-normalized tree with no magic header, version, or file
/// hash in front of it — the shape a calendar's `/digest` and
/// `/timestamp/<msg>` responses take (spec.md §4.4). Fails with
/// [`Error::TrailingGarbage`] if bytes remain after the tree.
pub fn read_tree(buf: &[u8]) -> Result<Tree> {
    let mut reader = Reader::new(buf);
    let tree = reader.read_tree()?;
    if reader.remaining() != 0 {
        return Err(Error::TrailingGarbage(reader.remaining()));
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_round_trips_small_values() {
        for n in [0u64, 1, 127, 128, 300, 16384, 1_000_000] {
            let mut out = Vec::new();
            crate::codec::writer::write_uint(n, &mut out);
            let mut r = Reader::new(&out);
            assert_eq!(r.read_uint().unwrap(), n);
            assert_eq!(r.remaining(), 0);
        }
    }

    #[test]
    fn varint_rejects_extreme_overflow() {
        // Ten continuation bytes, all with the high bit set: requires an
        // 11th byte's worth of shift, past the 2^63 threshold.
        let bytes = vec![0xffu8; 10];
        let mut r = Reader::new(&bytes);
        assert!(r.read_uint().is_err());
    }

    #[test]
    fn varint_truncated_continuation_is_eof() {
        let bytes = vec![0x80u8]; // continuation bit set, no following byte
        let mut r = Reader::new(&bytes);
        assert!(matches!(r.read_uint(), Err(Error::UnexpectedEof { .. })));
    }
}
