//! Zyphrax block codec.
//!
//! A block is at most `block_size` bytes of input encoded without reference
//! to any other block, so blocks can be compressed and decompressed in any
//! order and on any thread.

pub mod compress;
pub mod decompress;
pub mod encode;
pub mod search;
pub mod split;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{block_bound, compress_block, BlockEncoder};
pub use decompress::{decode_block, decompress_block, validate_header};
pub use split::{block_count, split_blocks, BlockSpan};
pub use types::{level_params, BlockHeader, BlockMode, LevelParams, BLOCK_HEADER_SIZE};
