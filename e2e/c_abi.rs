//! E2E Test Suite 04: C ABI
//!
//! Drives the exported `extern "C"` symbols exactly as a C caller would:
//! raw pointers, `size_t` lengths, and 0 as the only failure signal.

extern crate zyphrax;

use std::ptr;
use zyphrax::abi::{
    zyphrax_compress, zyphrax_compress_bound, zyphrax_compress_bound_params, zyphrax_decompress,
    ZyphraxParams,
};
use zyphrax::frame::FRAME_HEADER_SIZE;

fn c_compress(src: &[u8], params: Option<&ZyphraxParams>) -> Vec<u8> {
    let cap = zyphrax_compress_bound(src.len());
    assert!(cap > 0);
    let mut dst = vec![0u8; cap];
    let p = params.map_or(ptr::null(), |p| p as *const ZyphraxParams);
    let n = unsafe { zyphrax_compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), p) };
    assert!(n > 0 && n <= cap);
    dst.truncate(n);
    dst
}

fn c_decompress(frame: &[u8], capacity: usize) -> (usize, Vec<u8>) {
    let mut dst = vec![0u8; capacity];
    let n = unsafe { zyphrax_decompress(frame.as_ptr(), frame.len(), dst.as_mut_ptr(), dst.len()) };
    dst.truncate(n);
    (n, dst)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: roundtrip with default and explicit params
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_through_c_abi() {
    let src = b"crossing the C boundary, crossing the C boundary".repeat(100);

    let frame = c_compress(&src, None);
    let (n, out) = c_decompress(&frame, src.len());
    assert_eq!(n, src.len());
    assert_eq!(out, src);

    let params = ZyphraxParams { level: 9, block_size: 1024, checksum: 2 };
    let frame = c_compress(&src, Some(&params));
    assert_eq!(c_decompress(&frame, src.len()).1, src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: bounds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bounds() {
    let generic = zyphrax_compress_bound(1_000_000);
    let params = ZyphraxParams { level: 0, block_size: 4096, checksum: 1 };
    let exact = unsafe { zyphrax_compress_bound_params(1_000_000, &params) };
    assert!(exact > 0 && exact <= generic);
    let defaults = unsafe { zyphrax_compress_bound_params(1_000_000, ptr::null()) };
    assert!(defaults > 0 && defaults <= generic);
    assert_eq!(zyphrax_compress_bound(usize::MAX), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: every failure is 0
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_failures_return_zero() {
    let src = b"zero means failure ".repeat(50);
    let frame = c_compress(&src, None);

    // Destination one byte short, both directions.
    let mut small = vec![0u8; frame.len() - 1];
    let n = unsafe {
        zyphrax_compress(src.as_ptr(), src.len(), small.as_mut_ptr(), small.len(), ptr::null())
    };
    assert_eq!(n, 0);
    assert_eq!(c_decompress(&frame, src.len() - 1).0, 0);

    // Invalid params.
    let bad = ZyphraxParams { level: 42, block_size: 0, checksum: 0 };
    let mut dst = vec![0u8; zyphrax_compress_bound(src.len())];
    let n = unsafe { zyphrax_compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), &bad) };
    assert_eq!(n, 0);
    let bad = ZyphraxParams { level: 0, block_size: 0, checksum: 3 };
    assert_eq!(unsafe { zyphrax_compress_bound_params(10, &bad) }, 0);

    // Damaged frame.
    let mut damaged = frame.clone();
    damaged[0] ^= 0xFF;
    assert_eq!(c_decompress(&damaged, src.len()).0, 0);

    // NULL with a nonzero length.
    let n = unsafe { zyphrax_decompress(ptr::null(), 10, dst.as_mut_ptr(), dst.len()) };
    assert_eq!(n, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: empty input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_with_null_pointers() {
    let mut dst = vec![0u8; zyphrax_compress_bound(0)];
    let n = unsafe { zyphrax_compress(ptr::null(), 0, dst.as_mut_ptr(), dst.len(), ptr::null()) };
    assert_eq!(n, FRAME_HEADER_SIZE);
    // An empty frame decodes to 0 bytes, which is indistinguishable from failure here.
    let out = unsafe { zyphrax_decompress(dst.as_ptr(), n, ptr::null_mut(), 0) };
    assert_eq!(out, 0);
}
