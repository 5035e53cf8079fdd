//! Byte-string helpers shared across the crate: reversible hex, lexicographic
//! comparison, and concatenation.
//!
//! None of this is novel; it exists so the rest of the crate has one place to
//! import from instead of sprinkling `hex::encode`/`hex::decode` calls with
//! inconsistent error handling.

use crate::error::{Error, Result};

/// Lowercase-hex-encodes `bytes`.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string back to bytes. Case-insensitive, per the `hex` crate.
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| Error::ValidationError(format!("invalid hex: {e}")))
}

/// Lexicographic (byte-by-byte, shorter-is-less-if-prefix) comparison, used
/// for every canonical ordering rule in the data model.
pub fn lex_cmp(a: &[u8], b: &[u8]) -> std::cmp::Ordering {
    a.cmp(b)
}

/// Concatenates `a` and `b` into a new owned buffer.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips() {
        let bytes = [0x01, 0xff, 0x00, 0xab];
        assert_eq!(from_hex(&to_hex(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn lex_cmp_matches_byte_order() {
        use std::cmp::Ordering;
        assert_eq!(lex_cmp(&[0x01], &[0x02]), Ordering::Less);
        assert_eq!(lex_cmp(&[0x01, 0x00], &[0x01]), Ordering::Greater);
    }
}
