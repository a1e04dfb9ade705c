//! Frame-level constants, compression parameters and decoded frame metadata.
//!
//! Frame layout:
//!
//! | Offset | Size | Field                                                 |
//! |--------|------|-------------------------------------------------------|
//! | 0      | 4    | magic `"ZYFX"`                                         |
//! | 4      | 1    | format version (1)                                     |
//! | 5      | 1    | flags: bits 0..=1 checksum kind, bits 2..=7 reserved   |
//! | 6      | 1    | compression level used (1..=9)                         |
//! | 7      | 4    | block size, u32 LE                                     |
//! | 11     | 8    | content size (total original bytes), u64 LE            |
//! | 19     | 4    | header check: `xxh32(bytes 4..19, 0)`, u32 LE          |
//! | 23     | ..   | blocks, in order                                       |
//! | ..     | 0/4/8| content digest, LE, width set by the checksum kind     |

use crate::block::types::{level_params, LevelParams};
use crate::checksum::ChecksumKind;
use crate::config::{
    init_block_size, init_c_level, init_nb_workers, BLOCK_SIZE_DEFAULT, CLEVEL_DEFAULT,
    MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, NB_WORKERS_DEFAULT, NB_WORKERS_MAX,
};
use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Frame magic number.
pub const MAGIC: [u8; 4] = *b"ZYFX";

/// Only frame format version this crate reads and writes.
pub const FORMAT_VERSION: u8 = 1;

/// Offset of the header check, which covers every byte between the magic
/// number and itself.
pub const HEADER_CHECK_OFFSET: usize = 19;

/// Fixed size of the frame header.
pub const FRAME_HEADER_SIZE: usize = HEADER_CHECK_OFFSET + 4;

/// Widest possible trailer (an XXH64 digest).
pub const MAX_TRAILER_SIZE: usize = ChecksumKind::MAX_DIGEST_SIZE;

/// Flag bits holding the checksum kind.
pub const FLAG_CHECKSUM_MASK: u8 = 0b0000_0011;

/// Flag bits that must be zero.
pub const FLAG_RESERVED_MASK: u8 = !FLAG_CHECKSUM_MASK;

// ─────────────────────────────────────────────────────────────────────────────
// Params
// ─────────────────────────────────────────────────────────────────────────────

/// Compression parameters.
///
/// Out-of-range values are rejected by [`Params::validate`] (and therefore
/// by every compression entry point), never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Compression level, 1 (fastest) ..= 9 (smallest).
    pub level: u32,
    /// Maximum original bytes per block, [`MIN_BLOCK_SIZE`] ..= [`MAX_BLOCK_SIZE`].
    pub block_size: usize,
    /// Digest appended after the last block.
    pub checksum: ChecksumKind,
    /// Worker threads: 0 = one per CPU, 1 = run on the calling thread.
    pub workers: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            level: CLEVEL_DEFAULT,
            block_size: BLOCK_SIZE_DEFAULT,
            checksum: ChecksumKind::None,
            workers: NB_WORKERS_DEFAULT,
        }
    }
}

impl Params {
    /// Defaults overridden by `ZYPHRAX_CLEVEL`, `ZYPHRAX_BLOCK_SIZE` and
    /// `ZYPHRAX_NBWORKERS` where those are set.
    pub fn from_env() -> Self {
        Params {
            level: init_c_level(),
            block_size: init_block_size(),
            workers: init_nb_workers(),
            ..Params::default()
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_checksum(mut self, checksum: ChecksumKind) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check every field and return the search parameters for `level`.
    pub fn validate(&self) -> Result<LevelParams> {
        let lp = level_params(self.level)?;
        validate_block_size(self.block_size)?;
        if self.workers > NB_WORKERS_MAX {
            return Err(Error::WorkersInvalid(self.workers));
        }
        Ok(lp)
    }
}

/// [`Error::BlockSizeInvalid`] unless `block_size` is within the supported range.
#[inline]
pub fn validate_block_size(block_size: usize) -> Result<()> {
    if (MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&block_size) {
        Ok(())
    } else {
        Err(Error::BlockSizeInvalid(block_size))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameInfo
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata carried by a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Level the frame was compressed with (informational).
    pub level: u32,
    /// Maximum original bytes per block.
    pub block_size: usize,
    pub checksum: ChecksumKind,
    /// Total original bytes in the frame.
    pub content_size: u64,
}

impl FrameInfo {
    /// Bytes of digest at the end of the frame.
    #[inline]
    pub fn trailer_size(&self) -> usize {
        self.checksum.digest_size()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DecompressOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Options for [`decompress_with_options`](crate::frame::decompress::decompress_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressOptions {
    /// Worker threads: 0 = one per CPU, 1 = run on the calling thread.
    pub workers: usize,
}

impl Default for DecompressOptions {
    fn default() -> Self {
        DecompressOptions { workers: NB_WORKERS_DEFAULT }
    }
}

impl DecompressOptions {
    /// Defaults overridden by `ZYPHRAX_NBWORKERS`.
    pub fn from_env() -> Self {
        DecompressOptions { workers: init_nb_workers() }
    }
}
