//! Byte-order helpers, header check, header encode/parse and the
//! compress-bound functions.
//!
//! Covers:
//! - LE helpers (`write_le32`, `read_le64`, `write_le64`; `read_le32` lives with the block header)
//! - [`header_check`] / [`seal_header`]: the 32-bit header checksum
//! - [`write_header`] / [`parse_header`]
//! - [`compress_bound`] / [`frame_bound`]

use crate::block::split::block_count;
use crate::block::types::{read_le32, BLOCK_HEADER_SIZE};
use crate::checksum::ChecksumKind;
use crate::config::{CLEVEL_MAX, CLEVEL_MIN};
use crate::error::{Error, Result};
use crate::frame::types::{
    validate_block_size, FrameInfo, Params, FLAG_CHECKSUM_MASK, FLAG_RESERVED_MASK,
    FORMAT_VERSION, FRAME_HEADER_SIZE, HEADER_CHECK_OFFSET, MAGIC, MAX_TRAILER_SIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order I/O helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Write a little-endian `u32` into `dst` at byte `offset`.
#[inline]
pub fn write_le32(dst: &mut [u8], offset: usize, value: u32) {
    dst[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Read a little-endian `u64` from `src` at byte `offset`.
#[inline]
pub fn read_le64(src: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&src[offset..offset + 8]);
    u64::from_le_bytes(raw)
}

/// Write a little-endian `u64` into `dst` at byte `offset`.
#[inline]
pub fn write_le64(dst: &mut [u8], offset: usize, value: u64) {
    dst[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Header check
// ─────────────────────────────────────────────────────────────────────────────

/// Checksum over the header fields following the magic number.
///
/// `fields` is `header[4..HEADER_CHECK_OFFSET]`.
#[inline]
pub fn header_check(fields: &[u8]) -> u32 {
    xxhash_rust::xxh32::xxh32(fields, 0)
}

/// Recompute and store the header check of the header at the front of
/// `header`, which must hold at least [`FRAME_HEADER_SIZE`] bytes.
pub fn seal_header(header: &mut [u8]) {
    let check = header_check(&header[MAGIC.len()..HEADER_CHECK_OFFSET]);
    write_le32(header, HEADER_CHECK_OFFSET, check);
}

// ─────────────────────────────────────────────────────────────────────────────
// Header encode / parse
// ─────────────────────────────────────────────────────────────────────────────

/// Serialise the header for `info` into `dst[..FRAME_HEADER_SIZE]`.
///
/// Returns [`Error::DstTooSmall`] if `dst` is shorter than a header.
pub fn write_header(info: &FrameInfo, dst: &mut [u8]) -> Result<usize> {
    crate::error::ensure_capacity(FRAME_HEADER_SIZE, dst.len())?;
    debug_assert!(info.block_size <= u32::MAX as usize);
    dst[..4].copy_from_slice(&MAGIC);
    dst[4] = FORMAT_VERSION;
    dst[5] = info.checksum as u8;
    dst[6] = info.level as u8;
    write_le32(dst, 7, info.block_size as u32);
    write_le64(dst, 11, info.content_size);
    seal_header(dst);
    Ok(FRAME_HEADER_SIZE)
}

/// Parse and validate the frame header at the front of `src`.
///
/// Checks, in order: magic, size, version, header check, reserved flags and
/// checksum kind, level, block size.
pub fn parse_header(src: &[u8]) -> Result<FrameInfo> {
    let magic_len = src.len().min(MAGIC.len());
    if src[..magic_len] != MAGIC[..magic_len] {
        return Err(Error::FrameTypeUnknown);
    }
    if src.len() < FRAME_HEADER_SIZE {
        return Err(Error::FrameTruncated);
    }
    if src[4] != FORMAT_VERSION {
        return Err(Error::VersionUnsupported(src[4]));
    }
    let stored = read_le32(src, HEADER_CHECK_OFFSET);
    if header_check(&src[MAGIC.len()..HEADER_CHECK_OFFSET]) != stored {
        return Err(Error::HeaderChecksumInvalid);
    }

    let flags = src[5];
    if flags & FLAG_RESERVED_MASK != 0 {
        return Err(Error::ReservedFlagSet);
    }
    // Kind 3 is unassigned; treat it like any other reserved bit pattern.
    let checksum =
        ChecksumKind::try_from(flags & FLAG_CHECKSUM_MASK).map_err(|_| Error::ReservedFlagSet)?;

    let level = u32::from(src[6]);
    if !(CLEVEL_MIN..=CLEVEL_MAX).contains(&level) {
        return Err(Error::LevelInvalid(level));
    }
    let block_size = read_le32(src, 7) as usize;
    validate_block_size(block_size)?;
    let content_size = read_le64(src, 11);

    Ok(FrameInfo { level, block_size, checksum, content_size })
}

// ─────────────────────────────────────────────────────────────────────────────
// Compress-bound functions
// ─────────────────────────────────────────────────────────────────────────────

fn bound_with_trailer(src_size: usize, block_size: usize, trailer: usize) -> Result<usize> {
    validate_block_size(block_size)?;
    block_count(src_size, block_size)
        .checked_mul(BLOCK_HEADER_SIZE)
        .and_then(|headers| headers.checked_add(src_size))
        .and_then(|n| n.checked_add(FRAME_HEADER_SIZE + trailer))
        .ok_or(Error::SrcSizeTooLarge)
}

/// Worst-case frame size for `src_size` bytes split into `block_size` blocks,
/// for any level and any checksum kind.
///
/// `FRAME_HEADER_SIZE + MAX_TRAILER_SIZE + ceil(n / block_size) * 9 + n`.
///
/// # Errors
///
/// * [`Error::BlockSizeInvalid`] for an unsupported `block_size`.
/// * [`Error::SrcSizeTooLarge`] when the bound does not fit in `usize`.
pub fn compress_bound(src_size: usize, block_size: usize) -> Result<usize> {
    bound_with_trailer(src_size, block_size, MAX_TRAILER_SIZE)
}

/// Exact worst-case frame size for `src_size` bytes under `params`, using the
/// trailer width of `params.checksum`.
pub fn frame_bound(src_size: usize, params: &Params) -> Result<usize> {
    bound_with_trailer(src_size, params.block_size, params.checksum.digest_size())
}
