//! Content checksum unit.
//!
//! Thin layer over the `xxhash-rust` crate. The frame stores which digest was
//! used as a [`ChecksumKind`]; the digest itself is appended after the last
//! block, little-endian, in `ChecksumKind::digest_size()` bytes.
//!
//! Both the one-shot [`digest`] and the incremental [`ChecksumState`] use seed
//! 0 and agree for every chunking of the same byte sequence.

use xxhash_rust::xxh32::Xxh32;
use xxhash_rust::xxh64::Xxh64;

use crate::error::{Error, Result};

/// Seed used for every content digest.
pub const CHECKSUM_SEED: u32 = 0;

/// Which digest (if any) protects the frame content.
///
/// Stored in bits 0..=1 of the frame flags byte. Only the listed values are
/// valid; anything else is rejected at the format or ABI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChecksumKind {
    #[default]
    None = 0,
    Xxh32 = 1,
    Xxh64 = 2,
}

impl ChecksumKind {
    /// Width in bytes of the trailing digest.
    #[inline]
    pub const fn digest_size(self) -> usize {
        match self {
            ChecksumKind::None => 0,
            ChecksumKind::Xxh32 => 4,
            ChecksumKind::Xxh64 => 8,
        }
    }

    /// Largest digest width over every kind.
    pub const MAX_DIGEST_SIZE: usize = 8;
}

impl TryFrom<u32> for ChecksumKind {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(ChecksumKind::None),
            1 => Ok(ChecksumKind::Xxh32),
            2 => Ok(ChecksumKind::Xxh64),
            other => Err(Error::ChecksumKindInvalid(other)),
        }
    }
}

impl TryFrom<u8> for ChecksumKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        ChecksumKind::try_from(u32::from(value))
    }
}

/// Running digest over a byte stream.
#[derive(Clone)]
pub enum ChecksumState {
    None,
    Xxh32(Xxh32),
    Xxh64(Xxh64),
}

impl ChecksumState {
    pub fn new(kind: ChecksumKind) -> Self {
        match kind {
            ChecksumKind::None => ChecksumState::None,
            ChecksumKind::Xxh32 => ChecksumState::Xxh32(Xxh32::new(CHECKSUM_SEED)),
            ChecksumKind::Xxh64 => ChecksumState::Xxh64(Xxh64::new(u64::from(CHECKSUM_SEED))),
        }
    }

    pub fn kind(&self) -> ChecksumKind {
        match self {
            ChecksumState::None => ChecksumKind::None,
            ChecksumState::Xxh32(_) => ChecksumKind::Xxh32,
            ChecksumState::Xxh64(_) => ChecksumKind::Xxh64,
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        match self {
            ChecksumState::None => {}
            ChecksumState::Xxh32(h) => h.update(data),
            ChecksumState::Xxh64(h) => h.update(data),
        }
    }

    /// Final digest, widened to `u64`. Always 0 for [`ChecksumKind::None`].
    pub fn finish(&self) -> u64 {
        match self {
            ChecksumState::None => 0,
            ChecksumState::Xxh32(h) => u64::from(h.digest()),
            ChecksumState::Xxh64(h) => h.digest(),
        }
    }
}

/// One-shot digest of `data`.
#[inline]
pub fn digest(kind: ChecksumKind, data: &[u8]) -> u64 {
    match kind {
        ChecksumKind::None => 0,
        ChecksumKind::Xxh32 => u64::from(xxhash_rust::xxh32::xxh32(data, CHECKSUM_SEED)),
        ChecksumKind::Xxh64 => xxhash_rust::xxh64::xxh64(data, u64::from(CHECKSUM_SEED)),
    }
}

/// Serialise `value` into the first `kind.digest_size()` bytes of `dst`.
pub(crate) fn write_digest(kind: ChecksumKind, value: u64, dst: &mut [u8]) {
    let width = kind.digest_size();
    dst[..width].copy_from_slice(&value.to_le_bytes()[..width]);
}

/// Inverse of [`write_digest`]. `src` must hold at least `kind.digest_size()` bytes.
pub(crate) fn read_digest(kind: ChecksumKind, src: &[u8]) -> u64 {
    let width = kind.digest_size();
    let mut raw = [0u8; 8];
    raw[..width].copy_from_slice(&src[..width]);
    u64::from_le_bytes(raw)
}
