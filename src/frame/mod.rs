//! Zyphrax frame format: one-shot buffer-to-buffer compression and
//! decompression.

pub mod compress;
pub mod decompress;
pub mod header;
pub mod types;

// Re-export key public API items at the module level.
pub use compress::{compress, compress_to_vec};
pub use decompress::{
    decompress, decompress_to_vec, decompress_to_vec_with_options, decompress_with_options,
    get_frame_info, scan_blocks, BlockEntry, FrameLayout,
};
pub use header::{compress_bound, frame_bound};
pub use types::{
    DecompressOptions, FrameInfo, Params, FORMAT_VERSION, FRAME_HEADER_SIZE, HEADER_CHECK_OFFSET,
    MAGIC, MAX_TRAILER_SIZE,
};
