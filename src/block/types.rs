//! Block-level constants, header layout, and shared helpers.
//!
//! Covers:
//! - Token-format constants (`MINMATCH`, `ML_BITS`, `ML_MASK`, `RUN_MASK`)
//! - [`BlockMode`] and the 9-byte [`BlockHeader`]
//! - LEB128 varint helpers used for extended lengths and distances
//! - Hashing and forward match-length counting used by the match finder
//! - [`LevelParams`] and the per-level search table

use crate::config::{CLEVEL_MAX, CLEVEL_MIN};
use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Token format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Shortest back-reference the token format can express.
pub const MINMATCH: usize = 4;

/// Bits of the token used for the match length (low nibble).
pub const ML_BITS: u32 = 4;
pub const ML_MASK: u32 = (1u32 << ML_BITS) - 1;
/// Bits of the token used for the literal length (high nibble).
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: u32 = (1u32 << RUN_BITS) - 1;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Upper bound on varint encoding length for a `u64`.
pub const VARINT_MAX_LEN: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Block header
// ─────────────────────────────────────────────────────────────────────────────

/// `[mode:u8][original_len:u32 LE][encoded_len:u32 LE]`
pub const BLOCK_HEADER_SIZE: usize = 9;

/// How the payload of a block is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockMode {
    /// Verbatim copy of the original bytes.
    Stored = 0,
    /// Packed LZ token stream.
    Lz = 1,
    /// Packed LZ token stream, then canonical-Huffman coded.
    LzHuffman = 2,
}

impl TryFrom<u8> for BlockMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(BlockMode::Stored),
            1 => Ok(BlockMode::Lz),
            2 => Ok(BlockMode::LzHuffman),
            other => Err(Error::BlockModeInvalid(other)),
        }
    }
}

/// Decoded block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub mode: BlockMode,
    pub original_len: usize,
    pub encoded_len: usize,
}

impl BlockHeader {
    /// Serialise into the first [`BLOCK_HEADER_SIZE`] bytes of `dst`.
    ///
    /// Both lengths must fit in `u32`; the block size limit guarantees it.
    pub fn write(&self, dst: &mut [u8]) {
        debug_assert!(self.original_len <= u32::MAX as usize);
        debug_assert!(self.encoded_len <= u32::MAX as usize);
        dst[0] = self.mode as u8;
        dst[1..5].copy_from_slice(&(self.original_len as u32).to_le_bytes());
        dst[5..9].copy_from_slice(&(self.encoded_len as u32).to_le_bytes());
    }

    /// Parse a header from the front of `src`.
    ///
    /// Only the structure is checked here; length consistency against the
    /// frame is the caller's job.
    pub fn parse(src: &[u8]) -> Result<Self> {
        if src.len() < BLOCK_HEADER_SIZE {
            return Err(Error::FrameTruncated);
        }
        let mode = BlockMode::try_from(src[0])?;
        let original_len = read_le32(src, 1) as usize;
        let encoded_len = read_le32(src, 5) as usize;
        Ok(BlockHeader { mode, original_len, encoded_len })
    }
}

/// Largest packed token stream accepted for a block of `original_len` bytes.
///
/// `Lz` payloads must be shorter than `original_len` anyway; the slack lets a
/// literal-heavy stream still go through the Huffman stage. Also bounds the
/// `packed_len` field a decoder will allocate for.
#[inline]
pub fn packed_ceiling(original_len: usize) -> usize {
    original_len + original_len / 64 + 16
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u32` from `src` at byte `offset`.
#[inline]
pub fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([src[offset], src[offset + 1], src[offset + 2], src[offset + 3]])
}

/// Read a native-order `u32` used for 4-byte prefix comparison and hashing.
#[inline(always)]
pub fn read32(src: &[u8], pos: usize) -> u32 {
    u32::from_ne_bytes([src[pos], src[pos + 1], src[pos + 2], src[pos + 3]])
}

// ─────────────────────────────────────────────────────────────────────────────
// Varints (unsigned LEB128)
// ─────────────────────────────────────────────────────────────────────────────

/// Number of bytes `value` occupies as a varint.
#[inline]
pub fn varint_len(mut value: usize) -> usize {
    let mut n = 1;
    while value >= 0x80 {
        value >>= 7;
        n += 1;
    }
    n
}

/// Append `value` as a varint.
#[inline]
pub fn push_varint(out: &mut Vec<u8>, mut value: usize) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Read a varint from `src` at `*pos`, advancing `*pos`.
///
/// Returns `None` when the input ends mid-varint, when the encoding is longer
/// than [`VARINT_MAX_LEN`], or when the value does not fit in `usize`.
#[inline]
pub fn read_varint(src: &[u8], pos: &mut usize) -> Option<usize> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for _ in 0..VARINT_MAX_LEN {
        let byte = *src.get(*pos)?;
        *pos += 1;
        let low = u64::from(byte & 0x7F);
        if shift == 63 && low > 1 {
            return None;
        }
        value |= low << shift;
        if byte & 0x80 == 0 {
            return usize::try_from(value).ok();
        }
        shift += 7;
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing and match counting
// ─────────────────────────────────────────────────────────────────────────────

/// Largest hash-table log used by the match finder (64 Ki buckets).
pub const HASH_LOG_MAX: u32 = 16;

/// Smallest hash-table log used by the match finder.
pub const HASH_LOG_MIN: u32 = 8;

/// Hash-table log for a block of `block_len` bytes: roughly one bucket per
/// byte, clamped to `[HASH_LOG_MIN, HASH_LOG_MAX]`.
pub fn hash_log_for(block_len: usize) -> u32 {
    let bits = usize::BITS - block_len.max(1).saturating_sub(1).leading_zeros();
    bits.clamp(HASH_LOG_MIN, HASH_LOG_MAX)
}

/// Knuth multiplicative hash of a 4-byte sequence.
#[inline(always)]
pub fn hash4(sequence: u32, hash_log: u32) -> u32 {
    sequence.wrapping_mul(2_654_435_761u32) >> (32 - hash_log)
}

/// Number of equal bytes between `src[a..]` and `src[b..]`, stopping at `limit`.
///
/// Requires `a < b <= limit <= src.len()`. The comparison may overlap
/// (`b - a < length`), which is exactly the repeating-pattern case.
#[inline]
pub fn count(src: &[u8], a: usize, b: usize, limit: usize) -> usize {
    debug_assert!(a < b && b <= limit && limit <= src.len());
    let max = limit - b;
    let mut n = 0usize;
    while n + 8 <= max {
        let x = u64::from_le_bytes(word(src, a + n));
        let y = u64::from_le_bytes(word(src, b + n));
        let diff = x ^ y;
        if diff != 0 {
            return n + (diff.trailing_zeros() / 8) as usize;
        }
        n += 8;
    }
    while n < max && src[a + n] == src[b + n] {
        n += 1;
    }
    n
}

#[inline(always)]
fn word(src: &[u8], at: usize) -> [u8; 8] {
    let mut w = [0u8; 8];
    w.copy_from_slice(&src[at..at + 8]);
    w
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-level search parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Match-search effort for one compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    /// Maximum chain candidates examined per position.
    pub max_chain: u32,
    /// Whether a match may be deferred for a better one starting a byte later.
    pub lazy: bool,
    /// Shortest match accepted at this level (never below [`MINMATCH`]).
    pub min_match: usize,
    /// A match at least this long ends the chain walk immediately.
    pub nice_length: usize,
    /// Whether the Huffman stage is attempted on the packed token stream.
    pub entropy: bool,
}

const fn lp(
    max_chain: u32,
    lazy: bool,
    min_match: usize,
    nice_length: usize,
    entropy: bool,
) -> LevelParams {
    LevelParams { max_chain, lazy, min_match, nice_length, entropy }
}

/// Search parameters indexed by `level - 1`.
#[rustfmt::skip]
pub static LEVEL_TABLE: [LevelParams; CLEVEL_MAX as usize] = [
    lp(   1, false, 6,   16, false), /* 1 */
    lp(   4, false, 5,   32, false), /* 2 */
    lp(   8, false, 4,   64, false), /* 3, default */
    lp(  16, true,  4,   64, false), /* 4 */
    lp(  32, true,  4,  128, false), /* 5 */
    lp(  64, true,  4,  256, false), /* 6 */
    lp( 128, true,  4,  512, true ), /* 7 */
    lp( 256, true,  4, 1024, true ), /* 8 */
    lp(1024, true,  4, 4096, true ), /* 9 */
];

/// Parameters for `level`, or [`Error::LevelInvalid`] outside `1..=9`.
pub fn level_params(level: u32) -> Result<LevelParams> {
    if !(CLEVEL_MIN..=CLEVEL_MAX).contains(&level) {
        return Err(Error::LevelInvalid(level));
    }
    Ok(LEVEL_TABLE[(level - 1) as usize])
}
