//! Block decompression.
//!
//! # Security boundary
//!
//! Everything here consumes untrusted bytes. Every length read from the
//! input is checked against both the remaining input and the remaining
//! output before it is used; malformed or truncated input yields
//! [`Error::BlockCorrupt`] and never panics. No `unsafe` is used.

use super::types::{
    packed_ceiling, read_varint, BlockHeader, BlockMode, BLOCK_HEADER_SIZE, MINMATCH, ML_BITS,
    ML_MASK, RUN_MASK,
};
use crate::entropy;
use crate::error::{Error, Result};

/// Check the header's length fields against the mode's rules.
///
/// `Stored` payloads are exactly `original_len` long; coded payloads must be
/// strictly shorter, otherwise the block would have been stored.
#[inline]
pub fn validate_header(header: &BlockHeader, index: usize) -> Result<()> {
    let ok = header.original_len > 0
        && match header.mode {
            BlockMode::Stored => header.encoded_len == header.original_len,
            BlockMode::Lz | BlockMode::LzHuffman => header.encoded_len < header.original_len,
        };
    if ok {
        Ok(())
    } else {
        Err(Error::BlockCorrupt { index })
    }
}

/// Decode one block payload into `dst`, which must be exactly
/// `header.original_len` bytes long.
///
/// `index` only labels the error.
pub fn decode_block(
    header: &BlockHeader,
    payload: &[u8],
    dst: &mut [u8],
    index: usize,
) -> Result<()> {
    debug_assert_eq!(payload.len(), header.encoded_len);
    debug_assert_eq!(dst.len(), header.original_len);
    let corrupt = Error::BlockCorrupt { index };

    match header.mode {
        BlockMode::Stored => {
            if payload.len() != dst.len() {
                return Err(corrupt);
            }
            dst.copy_from_slice(payload);
            Ok(())
        }
        BlockMode::Lz => unpack_sequences(payload, dst).ok_or(corrupt),
        BlockMode::LzHuffman => {
            let packed = entropy::decode(payload, packed_ceiling(dst.len())).ok_or(corrupt)?;
            unpack_sequences(&packed, dst).ok_or(corrupt)
        }
    }
}

/// Parse, validate, and decode the block at the front of `src` into
/// `dst[..original_len]`.
///
/// Returns the number of input bytes consumed (header plus payload).
///
/// # Errors
///
/// * [`Error::FrameTruncated`] if the header or payload is cut short.
/// * [`Error::DstTooSmall`] if `dst` is shorter than the block's content.
/// * [`Error::BlockModeInvalid`] / [`Error::BlockCorrupt`] for bad contents.
pub fn decompress_block(src: &[u8], dst: &mut [u8], index: usize) -> Result<usize> {
    let header = BlockHeader::parse(src)?;
    validate_header(&header, index)?;
    let end = BLOCK_HEADER_SIZE
        .checked_add(header.encoded_len)
        .filter(|&e| e <= src.len())
        .ok_or(Error::FrameTruncated)?;
    crate::error::ensure_capacity(header.original_len, dst.len())?;
    decode_block(&header, &src[BLOCK_HEADER_SIZE..end], &mut dst[..header.original_len], index)?;
    Ok(end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Token stream decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Expand a packed token stream into exactly `dst.len()` bytes.
///
/// Returns `None` if the stream is malformed, if it would write past `dst`,
/// if a distance reaches before the start of the block, or if input bytes
/// remain once `dst` is full.
fn unpack_sequences(src: &[u8], dst: &mut [u8]) -> Option<()> {
    let oend = dst.len();
    let mut ip = 0usize;
    let mut op = 0usize;

    while op < oend {
        let token = *src.get(ip)?;
        ip += 1;

        // ── literals ─────────────────────────────────────────────────────────
        let mut lit_len = usize::from(token >> ML_BITS);
        if lit_len == RUN_MASK as usize {
            lit_len = lit_len.checked_add(read_varint(src, &mut ip)?)?;
        }
        if lit_len > oend - op || lit_len > src.len() - ip {
            return None;
        }
        dst[op..op + lit_len].copy_from_slice(&src[ip..ip + lit_len]);
        op += lit_len;
        ip += lit_len;

        let ml_code = usize::from(token) & ML_MASK as usize;
        if op == oend {
            // Closing literals-only sequence.
            if ml_code != 0 {
                return None;
            }
            break;
        }

        // ── match ────────────────────────────────────────────────────────────
        let distance = read_varint(src, &mut ip)?;
        if distance == 0 || distance > op {
            return None;
        }
        let mut match_len = ml_code + MINMATCH;
        if ml_code == ML_MASK as usize {
            match_len = match_len.checked_add(read_varint(src, &mut ip)?)?;
        }
        if match_len > oend - op {
            return None;
        }

        let from = op - distance;
        if distance >= match_len {
            dst.copy_within(from..from + match_len, op);
        } else {
            // Overlapping copy replicates the last `distance` bytes.
            for i in 0..match_len {
                dst[op + i] = dst[from + i];
            }
        }
        op += match_len;
    }

    (ip == src.len()).then_some(())
}
