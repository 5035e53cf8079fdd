//! Wire-format constants: the magic header and the 8-byte attestation
//! headers that select a [`crate::leaf::Leaf`] variant on read.

/// 31-byte magic header prefixing every detached timestamp file.
pub const MAGIC_HEADER: [u8; 31] = [
    0x00, 0x4f, 0x70, 0x65, 0x6e, 0x54, 0x69, 0x6d, 0x65, 0x73, 0x74, 0x61, 0x6d, 0x70, 0x73, 0x00,
    0x00, 0x50, 0x72, 0x6f, 0x6f, 0x66, 0x00, 0xbf, 0x89, 0xe2, 0xe8, 0x84, 0xe8, 0x92, 0x94,
];

/// Attestation header for a Bitcoin-anchored leaf.
pub const HEADER_BITCOIN: [u8; 8] = [0x05, 0x88, 0x96, 0x0d, 0x73, 0xd7, 0x19, 0x01];
/// Attestation header for a Litecoin-anchored leaf.
pub const HEADER_LITECOIN: [u8; 8] = [0x06, 0x86, 0x9a, 0x0d, 0x73, 0xd7, 0x1b, 0x45];
/// Attestation header for an Ethereum-anchored leaf.
pub const HEADER_ETHEREUM: [u8; 8] = [0x30, 0xfe, 0x80, 0x87, 0xb5, 0xc7, 0xea, 0xd7];
/// Attestation header for a pending (calendar) leaf.
pub const HEADER_PENDING: [u8; 8] = [0x83, 0xdf, 0xe3, 0x0d, 0x2e, 0xf9, 0x0c, 0x8e];

/// Tag byte for the `sha1` operation.
pub const TAG_SHA1: u8 = 0x02;
/// Tag byte for the `ripemd160` operation.
pub const TAG_RIPEMD160: u8 = 0x03;
/// Tag byte for the `sha256` operation.
pub const TAG_SHA256: u8 = 0x08;
/// Tag byte for the `keccak256` operation.
pub const TAG_KECCAK256: u8 = 0x67;
/// Tag byte for the `append` operation.
pub const TAG_APPEND: u8 = 0xf0;
/// Tag byte for the `prepend` operation.
pub const TAG_PREPEND: u8 = 0xf1;
/// Tag byte for the `reverse` operation.
pub const TAG_REVERSE: u8 = 0xf2;
/// Tag byte for the `hexlify` operation.
pub const TAG_HEXLIFY: u8 = 0xf3;

/// Tag byte marking a leaf record (as opposed to an operation edge).
pub const TAG_LEAF: u8 = 0x00;
/// Marker byte preceding every non-final child of a tree.
pub const TAG_NON_FINAL: u8 = 0xff;

/// File-hash algorithm tag for sha1 (20-byte digest).
pub const ALGO_SHA1: u8 = TAG_SHA1;
/// File-hash algorithm tag for ripemd160 (20-byte digest).
pub const ALGO_RIPEMD160: u8 = TAG_RIPEMD160;
/// File-hash algorithm tag for sha256 (32-byte digest).
pub const ALGO_SHA256: u8 = TAG_SHA256;
/// File-hash algorithm tag for keccak256 (32-byte digest).
pub const ALGO_KECCAK256: u8 = TAG_KECCAK256;
