//! One-shot frame decompression.
//!
//! Decoding runs in three steps:
//!
//! 1. [`parse_header`] validates the header and the capacity of `dst`.
//! 2. [`scan_blocks`] walks the block headers without decoding anything,
//!    checking every length against the frame and computing each block's
//!    output range. The input left after the last block must be exactly the
//!    trailer.
//! 3. The blocks are decoded into their ranges (sequentially, or on a
//!    [`WorkerPool`] over disjoint `split_at_mut` slices of `dst`), and the
//!    content digest is verified.

use log::debug;
use rayon::prelude::*;

use crate::block::decompress::{decode_block, validate_header};
use crate::block::types::{BlockHeader, BLOCK_HEADER_SIZE};
use crate::checksum::{digest, read_digest};
use crate::error::{ensure_capacity, Error, Result};
use crate::frame::header::parse_header;
use crate::frame::types::{DecompressOptions, FrameInfo, FRAME_HEADER_SIZE};
use crate::threadpool::WorkerPool;

/// Location of one block inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEntry {
    pub index: usize,
    pub header: BlockHeader,
    /// Offset of the payload in the frame.
    pub payload_offset: usize,
    /// Offset of the decoded bytes in the output.
    pub output_offset: usize,
}

/// Result of [`scan_blocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub info: FrameInfo,
    pub blocks: Vec<BlockEntry>,
    /// Offset of the trailer (the end of the last block).
    pub trailer_offset: usize,
}

/// Read the frame header at the front of `src`.
pub fn get_frame_info(src: &[u8]) -> Result<FrameInfo> {
    parse_header(src)
}

/// Validate the block structure of the frame in `src` without decoding.
///
/// # Errors
///
/// * [`Error::FrameTruncated`] if a block header, payload or the trailer is
///   cut short.
/// * [`Error::BlockModeInvalid`] / [`Error::BlockCorrupt`] for a bad header,
///   including a block other than the last that is not exactly
///   `info.block_size` long.
/// * [`Error::FrameSizeWrong`] if the blocks would produce more than the
///   declared content size, or bytes follow the trailer.
pub fn scan_blocks(src: &[u8], info: &FrameInfo) -> Result<FrameLayout> {
    let content_size = usize::try_from(info.content_size).map_err(|_| Error::FrameSizeWrong)?;
    let mut blocks = Vec::new();
    let mut pos = FRAME_HEADER_SIZE;
    let mut produced = 0usize;

    while produced < content_size {
        let index = blocks.len();
        let header = BlockHeader::parse(&src[pos.min(src.len())..])?;
        validate_header(&header, index)?;
        if header.original_len > info.block_size {
            return Err(Error::BlockCorrupt { index });
        }
        if header.original_len > content_size - produced {
            return Err(Error::FrameSizeWrong);
        }
        // Only the last block may be shorter than the frame's block size.
        let is_last = header.original_len == content_size - produced;
        if !is_last && header.original_len != info.block_size {
            return Err(Error::BlockCorrupt { index });
        }
        let payload_offset = pos + BLOCK_HEADER_SIZE;
        let end = payload_offset
            .checked_add(header.encoded_len)
            .filter(|&e| e <= src.len())
            .ok_or(Error::FrameTruncated)?;
        blocks.push(BlockEntry { index, header, payload_offset, output_offset: produced });
        produced += header.original_len;
        pos = end;
    }

    let remaining = src.len().saturating_sub(pos);
    let trailer = info.trailer_size();
    if remaining < trailer {
        return Err(Error::FrameTruncated);
    }
    if remaining > trailer {
        return Err(Error::FrameSizeWrong);
    }
    Ok(FrameLayout { info: *info, blocks, trailer_offset: pos })
}

fn decode_entry(src: &[u8], entry: &BlockEntry, out: &mut [u8]) -> Result<()> {
    let payload = &src[entry.payload_offset..entry.payload_offset + entry.header.encoded_len];
    decode_block(&entry.header, payload, out, entry.index)
}

/// Decode every block of `layout` into `dst[..content_size]` and verify the
/// digest. `dst` must already be large enough.
fn decode_layout(
    src: &[u8],
    layout: &FrameLayout,
    dst: &mut [u8],
    workers: usize,
) -> Result<usize> {
    let content_size = layout.info.content_size as usize;
    let out = &mut dst[..content_size];

    match WorkerPool::for_jobs(workers, layout.blocks.len()) {
        Some(pool) => {
            debug!(
                "decompress: {} blocks on {} workers",
                layout.blocks.len(),
                pool.nb_workers()
            );
            // Carve `out` into one disjoint slice per block.
            let mut jobs: Vec<(&BlockEntry, &mut [u8])> = Vec::with_capacity(layout.blocks.len());
            let mut rest = out;
            for entry in &layout.blocks {
                let (head, tail) = rest.split_at_mut(entry.header.original_len);
                jobs.push((entry, head));
                rest = tail;
            }
            pool.install(|| {
                jobs.into_par_iter()
                    .try_for_each(|(entry, slice)| decode_entry(src, entry, slice))
            })?;
        }
        None => {
            debug!("decompress: {} blocks", layout.blocks.len());
            for entry in &layout.blocks {
                let start = entry.output_offset;
                let end = start + entry.header.original_len;
                decode_entry(src, entry, &mut out[start..end])?;
            }
        }
    }

    let kind = layout.info.checksum;
    let stored = read_digest(kind, &src[layout.trailer_offset..]);
    if digest(kind, &dst[..content_size]) != stored {
        debug!("decompress: content digest mismatch");
        return Err(Error::ContentChecksumInvalid);
    }
    Ok(content_size)
}

/// Decompress the frame in `src` into `dst`.
///
/// Returns the number of bytes written, equal to the frame's content size.
///
/// # Errors
///
/// * `Format` errors for any structural problem in the frame.
/// * [`Error::DstTooSmall`] if the declared content size exceeds `dst.len()`.
/// * [`Error::ContentChecksumInvalid`] if the digest does not match.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    decompress_with_options(src, dst, &DecompressOptions::default())
}

/// [`decompress`] with an explicit worker count.
pub fn decompress_with_options(
    src: &[u8],
    dst: &mut [u8],
    options: &DecompressOptions,
) -> Result<usize> {
    let info = parse_header(src)?;
    let needed = usize::try_from(info.content_size).unwrap_or(usize::MAX);
    ensure_capacity(needed, dst.len())?;
    let layout = scan_blocks(src, &info)?;
    decode_layout(src, &layout, dst, options.workers)
}

/// Decompress the frame in `src` into a newly allocated buffer sized from
/// the header.
///
/// The block structure is validated before the output is allocated, so a
/// content size that the block headers do not add up to is rejected without
/// allocating.
pub fn decompress_to_vec(src: &[u8]) -> Result<Vec<u8>> {
    decompress_to_vec_with_options(src, &DecompressOptions::default())
}

/// [`decompress_to_vec`] with an explicit worker count.
pub fn decompress_to_vec_with_options(src: &[u8], options: &DecompressOptions) -> Result<Vec<u8>> {
    let info = parse_header(src)?;
    let layout = scan_blocks(src, &info)?;
    let mut out = vec![0u8; info.content_size as usize];
    decode_layout(src, &layout, &mut out, options.workers)?;
    Ok(out)
}
