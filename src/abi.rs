//! C-ABI shims: the foreign-call surface used by language bindings.
//!
//! Enabled with the `c-abi` feature (on by default). Builds as part of the
//! `staticlib` / `cdylib` artifacts.
//!
//! ```c
//! typedef struct { uint32_t level; uint32_t block_size; uint32_t checksum; } zyphrax_params_t;
//!
//! size_t zyphrax_compress_bound(size_t src_size);
//! size_t zyphrax_compress_bound_params(size_t src_size, const zyphrax_params_t *params);
//! size_t zyphrax_compress(const void *src, size_t src_size,
//!                         void *dst, size_t dst_capacity,
//!                         const zyphrax_params_t *params);
//! size_t zyphrax_decompress(const void *src, size_t src_size,
//!                           void *dst, size_t dst_capacity);
//! ```
//!
//! Every function returns 0 on failure. A compressed frame is never empty,
//! so 0 is unambiguous for the compress side; a frame whose content is
//! empty also decompresses to 0 bytes.

use std::slice;

use libc::size_t;
use log::debug;

use crate::checksum::ChecksumKind;
use crate::config::{BLOCK_SIZE_DEFAULT, CLEVEL_DEFAULT, MIN_BLOCK_SIZE};
use crate::error::Result;
use crate::frame::{compress, compress_bound, decompress, frame_bound, Params};

/// C view of [`Params`]. Zero `level` / `block_size` select the defaults.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZyphraxParams {
    pub level: u32,
    pub block_size: u32,
    pub checksum: u32,
}

impl ZyphraxParams {
    /// Convert to [`Params`], rejecting unknown checksum kinds. Range checks on
    /// the other fields happen when the params are used.
    pub fn to_params(&self) -> Result<Params> {
        Ok(Params {
            level: if self.level == 0 { CLEVEL_DEFAULT } else { self.level },
            block_size: if self.block_size == 0 {
                BLOCK_SIZE_DEFAULT
            } else {
                self.block_size as usize
            },
            checksum: ChecksumKind::try_from(self.checksum)?,
            ..Params::default()
        })
    }
}

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Resolve a possibly-NULL params pointer.
///
/// # Safety
/// `params` must be NULL or point to a readable `ZyphraxParams`.
unsafe fn params_from_ptr(params: *const ZyphraxParams) -> Result<Params> {
    match params.as_ref() {
        Some(p) => p.to_params(),
        None => Ok(Params::default()),
    }
}

/// Build an input slice; a zero length allows a NULL pointer.
///
/// # Safety
/// For non-zero `len`, `ptr` must be valid for `len` bytes of reads.
unsafe fn input<'a>(ptr: *const u8, len: size_t) -> Option<&'a [u8]> {
    if len == 0 {
        Some(&[])
    } else if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(ptr, len))
    }
}

/// Build an output slice; a zero capacity allows a NULL pointer.
///
/// # Safety
/// For non-zero `cap`, `ptr` must be valid for `cap` bytes of writes and not
/// aliased by any other live slice.
unsafe fn output<'a>(ptr: *mut u8, cap: size_t) -> Option<&'a mut [u8]> {
    if cap == 0 {
        Some(&mut [])
    } else if ptr.is_null() {
        None
    } else {
        Some(slice::from_raw_parts_mut(ptr, cap))
    }
}

#[inline]
fn or_zero(result: Result<usize>, what: &str) -> size_t {
    result.unwrap_or_else(|e| {
        debug!("{what} failed: {e}");
        0
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_compress_bound(size_t src_size);
//
// Bound valid for every block size, level and checksum kind; 0 if the bound
// is not representable.
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub extern "C" fn zyphrax_compress_bound(src_size: size_t) -> size_t {
    or_zero(compress_bound(src_size, MIN_BLOCK_SIZE), "zyphrax_compress_bound")
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_compress_bound_params(size_t src_size, const zyphrax_params_t *params);
//
// Exact bound for the given params (NULL = defaults); 0 on invalid params.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `params` must be NULL or point to a readable `ZyphraxParams`.
#[no_mangle]
pub unsafe extern "C" fn zyphrax_compress_bound_params(
    src_size: size_t,
    params: *const ZyphraxParams,
) -> size_t {
    let result = params_from_ptr(params).and_then(|p| {
        p.validate()?;
        frame_bound(src_size, &p)
    });
    or_zero(result, "zyphrax_compress_bound_params")
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_compress(const void *src, size_t src_size,
//                         void *dst, size_t dst_capacity,
//                         const zyphrax_params_t *params);
//
// Returns the frame size written to dst, or 0 on failure.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `src` must be valid for `src_size` bytes of reads and `dst` for
/// `dst_capacity` bytes of writes (either may be NULL when its length is 0);
/// the two regions must not overlap. `params` must be NULL or point to a
/// readable `ZyphraxParams`.
#[no_mangle]
pub unsafe extern "C" fn zyphrax_compress(
    src: *const u8,
    src_size: size_t,
    dst: *mut u8,
    dst_capacity: size_t,
    params: *const ZyphraxParams,
) -> size_t {
    let (Some(src), Some(dst)) = (input(src, src_size), output(dst, dst_capacity)) else {
        return 0;
    };
    let result = params_from_ptr(params).and_then(|p| compress(src, dst, &p));
    or_zero(result, "zyphrax_compress")
}

// ─────────────────────────────────────────────────────────────────────────────
// size_t zyphrax_decompress(const void *src, size_t src_size,
//                           void *dst, size_t dst_capacity);
//
// Returns the number of bytes written to dst, or 0 on failure.
// ─────────────────────────────────────────────────────────────────────────────
/// # Safety
/// `src` must be valid for `src_size` bytes of reads and `dst` for
/// `dst_capacity` bytes of writes (either may be NULL when its length is 0);
/// the two regions must not overlap.
#[no_mangle]
pub unsafe extern "C" fn zyphrax_decompress(
    src: *const u8,
    src_size: size_t,
    dst: *mut u8,
    dst_capacity: size_t,
) -> size_t {
    let (Some(src), Some(dst)) = (input(src, src_size), output(dst, dst_capacity)) else {
        return 0;
    };
    or_zero(decompress(src, dst), "zyphrax_decompress")
}
