// zyphrax: block-independent LZ compressor with a fixed C ABI

pub mod block;
pub mod checksum;
pub mod config;
pub mod entropy;
pub mod error;
pub mod frame;
pub mod threadpool;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ────────────────────────────────────────────────────────
pub const ZYPHRAX_VERSION_MAJOR: u32 = 0;
pub const ZYPHRAX_VERSION_MINOR: u32 = 3;
pub const ZYPHRAX_VERSION_RELEASE: u32 = 0;
pub const ZYPHRAX_VERSION_NUMBER: u32 =
    ZYPHRAX_VERSION_MAJOR * 100 * 100 + ZYPHRAX_VERSION_MINOR * 100 + ZYPHRAX_VERSION_RELEASE;
pub const ZYPHRAX_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    ZYPHRAX_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ZYPHRAX_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use checksum::ChecksumKind;
pub use error::{Error, ErrorKind, Result};
pub use frame::{
    compress, compress_bound, compress_to_vec, decompress, decompress_to_vec,
    decompress_to_vec_with_options, decompress_with_options, frame_bound, get_frame_info,
    DecompressOptions, FrameInfo, Params,
};
