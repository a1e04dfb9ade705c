//! E2E Test Suite 03: Parallel Execution
//!
//! Blocks are independent, so the worker count must never change the bytes
//! of a frame or the result of decoding one:
//! - compressed output is identical for 1, 2, 4 and auto workers
//! - parallel decompression matches sequential decompression
//! - errors in any block surface from the parallel path

extern crate zyphrax;

use zyphrax::{
    compress_to_vec, decompress_to_vec, decompress_to_vec_with_options, decompress_with_options,
    ChecksumKind, DecompressOptions, Error, Params,
};
use zyphrax::frame::scan_blocks;
use zyphrax::get_frame_info;

/// Route the codec's `debug!` lines to the test output (`RUST_LOG=debug`).
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn corpus() -> Vec<u8> {
    let mut x = 7u32;
    let mut out = Vec::with_capacity(400_000);
    for i in 0..400_000u32 {
        x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        // Alternate compressible text with noisy stretches.
        let b = if (i / 10_000) % 3 == 2 {
            (x >> 24) as u8
        } else {
            b"parallel blocks "[(i % 16) as usize]
        };
        out.push(b);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: output does not depend on the worker count
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_parallel_output_identical_to_sequential() {
    init_logging();
    let src = corpus();
    for level in [1u32, 4, 9] {
        let base = Params::default()
            .with_level(level)
            .with_block_size(16 * 1024)
            .with_checksum(ChecksumKind::Xxh64);
        let sequential = compress_to_vec(&src, &base.with_workers(1)).unwrap();
        for workers in [0usize, 2, 4] {
            let parallel = compress_to_vec(&src, &base.with_workers(workers)).unwrap();
            assert_eq!(parallel, sequential, "level {level}, {workers} workers");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: parallel decompression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_parallel_decompress() {
    init_logging();
    let src = corpus();
    let params = Params::default().with_block_size(8192).with_workers(4);
    let frame = compress_to_vec(&src, &params).unwrap();
    let nb_blocks = scan_blocks(&frame, &get_frame_info(&frame).unwrap()).unwrap().blocks.len();
    assert_eq!(nb_blocks, src.len().div_ceil(8192));

    for workers in [0usize, 1, 3, 8] {
        let out = decompress_to_vec_with_options(&frame, &DecompressOptions { workers }).unwrap();
        assert_eq!(out, src, "{workers} workers");
    }

    let mut dst = vec![0u8; src.len() + 100];
    let n = decompress_with_options(&frame, &mut dst, &DecompressOptions { workers: 4 }).unwrap();
    assert_eq!(&dst[..n], &src[..]);
    assert_eq!(decompress_to_vec(&frame).unwrap(), src);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a damaged block fails the parallel path too
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_parallel_decompress_reports_corruption() {
    init_logging();
    let src = corpus();
    let params = Params::default().with_block_size(4096).with_checksum(ChecksumKind::Xxh32);
    let frame = compress_to_vec(&src, &params).unwrap();
    let layout = scan_blocks(&frame, &get_frame_info(&frame).unwrap()).unwrap();
    let last = layout.blocks.last().unwrap();
    let mut bad = frame.clone();
    bad[last.payload_offset] ^= 0x40;
    let err = decompress_to_vec_with_options(&bad, &DecompressOptions { workers: 4 }).unwrap_err();
    let seq = decompress_to_vec_with_options(&bad, &DecompressOptions { workers: 1 }).unwrap_err();
    assert!(
        matches!(err, Error::BlockCorrupt { .. } | Error::ContentChecksumInvalid),
        "{err:?}"
    );
    assert_eq!(err.kind(), seq.kind());
}
