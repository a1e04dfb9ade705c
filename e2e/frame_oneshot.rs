//! E2E Test Suite 01: Frame One-Shot API
//!
//! Exercises the public compress / decompress pair on the inputs a caller
//! is most likely to hit first:
//! - short repetitive text
//! - long runs of a single byte
//! - empty and one-byte inputs
//! - inputs sitting on block boundaries
//! - every level and checksum kind

extern crate zyphrax;

use zyphrax::{
    compress, compress_bound, compress_to_vec, decompress, decompress_to_vec, get_frame_info,
    ChecksumKind, Params,
};
use zyphrax::frame::{FRAME_HEADER_SIZE, MAGIC};

fn roundtrip(src: &[u8], params: &Params) -> Vec<u8> {
    let frame = compress_to_vec(src, params).expect("compression should succeed");
    let out = decompress_to_vec(&frame).expect("decompression should succeed");
    assert_eq!(out, src, "roundtrip mismatch for {params:?}");
    frame
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: repetitive text shrinks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hello_world_repeated() {
    let src = b"Hello World ".repeat(10);
    let frame = roundtrip(&src, &Params::default());
    assert!(frame.len() < src.len(), "{} >= {}", frame.len(), src.len());
    assert_eq!(&frame[..4], &MAGIC);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: 100 000 identical bytes collapse to a few hundred bytes at most
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_long_run_of_identical_bytes() {
    let src = vec![b'A'; 100_000];
    for level in 1..=9 {
        let frame = roundtrip(&src, &Params::default().with_level(level));
        assert!(frame.len() < 300, "level {level}: {} bytes", frame.len());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: empty input is a bare header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_input() {
    for kind in [ChecksumKind::None, ChecksumKind::Xxh32, ChecksumKind::Xxh64] {
        let frame = roundtrip(b"", &Params::default().with_checksum(kind));
        assert_eq!(frame.len(), FRAME_HEADER_SIZE + kind.digest_size());
        assert_eq!(get_frame_info(&frame).unwrap().content_size, 0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: one byte
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte() {
    for level in 1..=9 {
        roundtrip(b"Z", &Params::default().with_level(level));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: sizes around block boundaries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_block_boundaries() {
    let bs = 1024;
    let text = b"boundary conditions are where the bugs live; ".repeat(200);
    for n in [bs - 1, bs, bs + 1, 2 * bs, 3 * bs + 7] {
        let params = Params::default().with_block_size(bs).with_checksum(ChecksumKind::Xxh64);
        roundtrip(&text[..n], &params);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: higher levels never lose to level 1 by much on text
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_levels_on_text() {
    let src: Vec<u8> = (0..20_000u32)
        .flat_map(|i| format!("line {} of the log: status={} ", i % 97, i % 7).into_bytes())
        .collect();
    let fast = roundtrip(&src, &Params::default().with_level(1)).len();
    let best = roundtrip(&src, &Params::default().with_level(9)).len();
    assert!(best <= fast, "level 9 ({best}) larger than level 1 ({fast})");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: caller-provided buffers sized by the bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_buffers_sized_by_bound() {
    let src = b"0123456789abcdef".repeat(5000);
    let params = Params::default().with_checksum(ChecksumKind::Xxh32);
    let mut frame = vec![0u8; compress_bound(src.len(), params.block_size).unwrap()];
    let n = compress(&src, &mut frame, &params).unwrap();
    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress(&frame[..n], &mut out), Ok(src.len()));
    assert_eq!(out, src);
}
