//! E2E Test Suite 02: Error Handling
//!
//! Every failure mode a caller can provoke through the public API:
//! - destination buffers one byte short, in both directions
//! - invalid parameters
//! - damaged, truncated and foreign frames
//!
//! Nothing here may panic.

extern crate zyphrax;

use zyphrax::frame::FRAME_HEADER_SIZE;
use zyphrax::{
    compress, compress_to_vec, decompress, decompress_to_vec, ChecksumKind, Error, ErrorKind,
    Params,
};

/// Route the codec's `debug!` lines to the test output (`RUST_LOG=debug`).
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> Vec<u8> {
    b"error handling must be boring and predictable. ".repeat(300)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: compress into a buffer one byte short
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_one_byte_short() {
    init_logging();
    let src = sample();
    let params = Params::default().with_block_size(1024).with_checksum(ChecksumKind::Xxh32);
    let n = compress_to_vec(&src, &params).unwrap().len();

    let mut exact = vec![0u8; n];
    assert_eq!(compress(&src, &mut exact, &params), Ok(n));

    let mut short = vec![0u8; n - 1];
    let err = compress(&src, &mut short, &params).unwrap_err();
    assert_eq!(err, Error::DstTooSmall { needed: n, available: n - 1 });
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: decompress into a buffer one byte short
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_one_byte_short() {
    init_logging();
    let src = sample();
    let frame = compress_to_vec(&src, &Params::default()).unwrap();
    let mut short = vec![0u8; src.len() - 1];
    let err = decompress(&frame, &mut short).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Capacity);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: invalid parameters
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_params() {
    init_logging();
    let src = sample();
    let mut dst = vec![0u8; 1 << 16];
    let cases = [
        (Params::default().with_level(0), Error::LevelInvalid(0)),
        (Params::default().with_level(10), Error::LevelInvalid(10)),
        (Params::default().with_block_size(63), Error::BlockSizeInvalid(63)),
        (
            Params::default().with_block_size((16 << 20) + 1),
            Error::BlockSizeInvalid((16 << 20) + 1),
        ),
        (Params::default().with_workers(201), Error::WorkersInvalid(201)),
    ];
    for (params, expected) in cases {
        assert_eq!(compress(&src, &mut dst, &params), Err(expected));
        assert_eq!(expected.kind(), ErrorKind::Config);
    }
    // Nothing was written.
    assert!(dst.iter().all(|&b| b == 0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: single-byte corruption with a checksum
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte_corruption_is_detected() {
    init_logging();
    let src = sample();
    for kind in [ChecksumKind::Xxh32, ChecksumKind::Xxh64] {
        for level in [1u32, 5, 9] {
            let params =
                Params::default().with_level(level).with_block_size(2048).with_checksum(kind);
            let frame = compress_to_vec(&src, &params).unwrap();
            for i in (0..frame.len()).step_by(7) {
                let mut bad = frame.clone();
                bad[i] = bad[i].wrapping_add(1);
                assert!(decompress_to_vec(&bad).is_err(), "{kind:?} level {level}: byte {i}");
            }
        }
    }
}

#[test]
fn test_every_header_byte_value_is_detected() {
    init_logging();
    let src = sample();
    for kind in [ChecksumKind::Xxh32, ChecksumKind::Xxh64] {
        let params = Params::default().with_level(5).with_block_size(2048).with_checksum(kind);
        let frame = compress_to_vec(&src, &params).unwrap();
        for i in 4..FRAME_HEADER_SIZE {
            for v in 0..=255u8 {
                if v == frame[i] {
                    continue;
                }
                let mut bad = frame.clone();
                bad[i] = v;
                assert!(decompress_to_vec(&bad).is_err(), "{kind:?}: byte {i} = {v:#04x}");
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: truncation at every length
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_every_truncation_fails() {
    init_logging();
    let src = sample();
    let frame = compress_to_vec(&src, &Params::default().with_block_size(512)).unwrap();
    for cut in 0..frame.len() {
        let err = decompress_to_vec(&frame[..cut]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format, "cut at {cut}: {err:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: foreign input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bad_magic() {
    init_logging();
    let mut frame = compress_to_vec(&sample(), &Params::default()).unwrap();
    frame[0] = b'X';
    assert_eq!(decompress_to_vec(&frame), Err(Error::FrameTypeUnknown));
    assert_eq!(decompress_to_vec(&[0x28, 0xB5, 0x2F, 0xFD, 0, 0]), Err(Error::FrameTypeUnknown));
}

#[test]
fn test_garbage_never_panics() {
    init_logging();
    let mut x = 0x1234_5678u32;
    for len in 0..300 {
        let mut buf: Vec<u8> = (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                x as u8
            })
            .collect();
        let _ = decompress_to_vec(&buf);
        if buf.len() >= 4 {
            buf[..4].copy_from_slice(b"ZYFX");
        }
        let _ = decompress_to_vec(&buf);
    }
}
