//! Block compression.
//!
//! Each block is compressed independently of every other block:
//!
//! 1. The block is parsed into sequences by the hash-chain match finder
//!    (greedy at levels 1-3, lazy from level 4 up) and packed into a token
//!    stream. Packing stops as soon as the stream can no longer win.
//! 2. At levels with `entropy` enabled the token stream is also Huffman
//!    coded, and the shorter of the two payloads is kept.
//! 3. If neither payload is strictly shorter than the original bytes, the
//!    block is written `Stored`.
//!
//! Output is deterministic: the same bytes and level always give the same
//! block, whichever thread compresses it.

use log::trace;

use super::encode::{push_last_literals, push_sequence, sequence_size};
use super::search::HashChain;
use super::types::{
    level_params, packed_ceiling, BlockHeader, BlockMode, LevelParams, BLOCK_HEADER_SIZE,
    MINMATCH,
};
use crate::entropy;
use crate::error::{ensure_capacity, Result};

/// Worst-case size of one compressed block, header included.
#[inline]
pub const fn block_bound(original_len: usize) -> usize {
    BLOCK_HEADER_SIZE + original_len
}

/// Reusable per-thread compression state.
///
/// Holding one of these across blocks keeps the hash tables and the packing
/// buffer allocated between calls.
#[derive(Debug, Default)]
pub struct BlockEncoder {
    chain: HashChain,
    packed: Vec<u8>,
}

impl BlockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress `src` as one block into `dst`, header included.
    ///
    /// Returns the number of bytes written. An empty `src` writes nothing.
    ///
    /// # Errors
    ///
    /// [`Error::DstTooSmall`](crate::Error::DstTooSmall) if `dst` cannot hold
    /// the chosen encoding.
    pub fn compress_block(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        params: &LevelParams,
    ) -> Result<usize> {
        if src.is_empty() {
            return Ok(0);
        }
        debug_assert!(src.len() <= u32::MAX as usize);

        let ceiling = if params.entropy { packed_ceiling(src.len()) } else { src.len() };
        let packed_ok = self.pack(src, params, ceiling);

        let mut huffman: Option<Vec<u8>> = None;
        if packed_ok && params.entropy {
            let limit = self.packed.len().min(src.len());
            huffman = entropy::encode(&self.packed, limit);
        }

        let (mode, payload): (BlockMode, &[u8]) = match huffman.as_deref() {
            Some(h) => (BlockMode::LzHuffman, h),
            None if packed_ok && self.packed.len() < src.len() => (BlockMode::Lz, &self.packed),
            None => (BlockMode::Stored, src),
        };

        let total = BLOCK_HEADER_SIZE + payload.len();
        ensure_capacity(total, dst.len())?;
        BlockHeader { mode, original_len: src.len(), encoded_len: payload.len() }.write(dst);
        dst[BLOCK_HEADER_SIZE..total].copy_from_slice(payload);
        trace!("block: {} -> {} bytes ({:?})", src.len(), payload.len(), mode);
        Ok(total)
    }

    /// Parse `src` and pack the token stream into `self.packed`.
    ///
    /// Returns `false` as soon as the stream would reach `ceiling` bytes.
    fn pack(&mut self, src: &[u8], params: &LevelParams, ceiling: usize) -> bool {
        self.packed.clear();
        self.chain.reset(src.len());

        let end = src.len();
        let mut anchor = 0usize;
        let mut pos = 0usize;

        while pos + MINMATCH <= end {
            let Some(mut m) = self.chain.find_best(src, pos, params) else {
                pos += 1;
                continue;
            };

            if params.lazy {
                // Defer while the next position offers a strictly better deal.
                while m.len < params.nice_length && pos + 1 + MINMATCH <= end {
                    match self.chain.find_best(src, pos + 1, params) {
                        Some(next) if next.gain() > m.gain() => {
                            pos += 1;
                            m = next;
                        }
                        _ => break,
                    }
                }
            }

            if self.packed.len() + sequence_size(pos - anchor, Some(m)) >= ceiling {
                return false;
            }
            push_sequence(&mut self.packed, &src[anchor..pos], m);
            pos += m.len;
            anchor = pos;
        }

        if self.packed.len() + sequence_size(end - anchor, None) >= ceiling {
            return false;
        }
        push_last_literals(&mut self.packed, &src[anchor..]);
        true
    }
}

/// One-shot block compression at `level` (1..=9).
pub fn compress_block(src: &[u8], dst: &mut [u8], level: u32) -> Result<usize> {
    let params = level_params(level)?;
    BlockEncoder::new().compress_block(src, dst, &params)
}
