//! Error type shared by every layer of the codec.
//!
//! Each variant belongs to exactly one [`ErrorKind`]:
//!
//! | Kind        | Raised when                                              |
//! |-------------|----------------------------------------------------------|
//! | `Config`    | `Params` are rejected before any encoding work starts     |
//! | `Capacity`  | the destination buffer cannot hold the next write         |
//! | `Format`    | decode-time structural problems in the frame or a block   |
//! | `Integrity` | the content digest does not match the decoded bytes       |
//!
//! Across the C boundary every variant collapses to the `0` sentinel; inside
//! Rust the variant is preserved so that callers can tell them apart.

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Capacity,
    Format,
    Integrity,
}

/// All failures reported by the Zyphrax codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    // ── configuration ────────────────────────────────────────────────────────
    #[error("compression level {0} is outside the supported range 1..=9")]
    LevelInvalid(u32),

    #[error("block size {0} is outside the supported range")]
    BlockSizeInvalid(usize),

    #[error("unknown checksum kind {0}")]
    ChecksumKindInvalid(u32),

    #[error("worker count {0} exceeds the supported maximum")]
    WorkersInvalid(usize),

    #[error("source size is too large to be framed")]
    SrcSizeTooLarge,

    // ── capacity ─────────────────────────────────────────────────────────────
    #[error("destination too small: {needed} bytes needed, {available} available")]
    DstTooSmall { needed: usize, available: usize },

    // ── format ───────────────────────────────────────────────────────────────
    #[error("unknown frame magic number")]
    FrameTypeUnknown,

    #[error("unsupported frame format version {0}")]
    VersionUnsupported(u8),

    #[error("reserved frame flag bits are set")]
    ReservedFlagSet,

    #[error("frame header check mismatch")]
    HeaderChecksumInvalid,

    #[error("frame is truncated")]
    FrameTruncated,

    #[error("unknown block mode {0}")]
    BlockModeInvalid(u8),

    #[error("block {index} is corrupt")]
    BlockCorrupt { index: usize },

    #[error("decoded size does not match the size declared in the frame header")]
    FrameSizeWrong,

    // ── integrity ────────────────────────────────────────────────────────────
    #[error("content checksum mismatch")]
    ContentChecksumInvalid,
}

impl Error {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::LevelInvalid(_)
            | Error::BlockSizeInvalid(_)
            | Error::ChecksumKindInvalid(_)
            | Error::WorkersInvalid(_)
            | Error::SrcSizeTooLarge => ErrorKind::Config,
            Error::DstTooSmall { .. } => ErrorKind::Capacity,
            Error::FrameTypeUnknown
            | Error::VersionUnsupported(_)
            | Error::ReservedFlagSet
            | Error::HeaderChecksumInvalid
            | Error::FrameTruncated
            | Error::BlockModeInvalid(_)
            | Error::BlockCorrupt { .. }
            | Error::FrameSizeWrong => ErrorKind::Format,
            Error::ContentChecksumInvalid => ErrorKind::Integrity,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Checks that `available` bytes can hold `needed` bytes.
#[inline]
pub(crate) fn ensure_capacity(needed: usize, available: usize) -> Result<()> {
    if needed > available {
        Err(Error::DstTooSmall { needed, available })
    } else {
        Ok(())
    }
}
