// Block compression: mode selection, size guarantees, capacity handling.

use zyphrax::block::{
    block_bound, compress_block, decompress_block, level_params, BlockEncoder, BlockHeader,
    BlockMode, BLOCK_HEADER_SIZE,
};
use zyphrax::Error;

fn xorshift_bytes(n: usize, seed: u32) -> Vec<u8> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 7) as u8
        })
        .collect()
}

fn compress(src: &[u8], level: u32) -> Vec<u8> {
    let mut dst = vec![0u8; block_bound(src.len())];
    let n = compress_block(src, &mut dst, level).expect("block compression should succeed");
    dst.truncate(n);
    dst
}

fn roundtrip(src: &[u8], level: u32) -> Vec<u8> {
    let block = compress(src, level);
    let mut out = vec![0u8; src.len()];
    let consumed = decompress_block(&block, &mut out, 0).expect("block should decode");
    assert_eq!(consumed, block.len());
    assert_eq!(out, src, "level {level}");
    block
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn coded_blocks_are_strictly_smaller() {
    let inputs: Vec<Vec<u8>> = vec![
        b"Hello World ".repeat(10),
        vec![0u8; 5000],
        b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab".to_vec(),
    ];
    for src in &inputs {
        for level in 1..=9 {
            let block = roundtrip(src, level);
            let hdr = BlockHeader::parse(&block).unwrap();
            if hdr.mode == BlockMode::Stored {
                assert_eq!(hdr.encoded_len, hdr.original_len);
            } else {
                assert!(hdr.encoded_len < hdr.original_len);
            }
        }
    }
}

#[test]
fn random_block_falls_back_to_stored() {
    let src = xorshift_bytes(8192, 0xC0FF_EE11);
    for level in 1..=9 {
        let block = roundtrip(&src, level);
        assert_eq!(block[0], BlockMode::Stored as u8);
        assert_eq!(&block[BLOCK_HEADER_SIZE..], &src[..]);
    }
}

#[test]
fn single_byte_block() {
    let block = roundtrip(b"x", 3);
    assert_eq!(block.len(), BLOCK_HEADER_SIZE + 1);
}

#[test]
fn block_never_exceeds_bound() {
    for n in [1usize, 3, 4, 5, 15, 16, 17, 64, 255, 256, 1000] {
        let src = xorshift_bytes(n, n as u32 + 1);
        for level in [1u32, 4, 9] {
            assert!(compress(&src, level).len() <= block_bound(n));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder reuse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reused_encoder_matches_fresh_encoder() {
    let p = level_params(8).unwrap();
    let blocks = [
        b"first block first block first block".to_vec(),
        xorshift_bytes(2000, 5),
        b"third; third; third; third; third;".repeat(30),
    ];
    let mut reused = BlockEncoder::new();
    for src in &blocks {
        let mut a = vec![0u8; block_bound(src.len())];
        let mut b = vec![0u8; block_bound(src.len())];
        let na = reused.compress_block(src, &mut a, &p).unwrap();
        let nb = BlockEncoder::new().compress_block(src, &mut b, &p).unwrap();
        assert_eq!(a[..na], b[..nb]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn exact_capacity_succeeds_one_short_fails() {
    for src in [b"Hello World ".repeat(10), xorshift_bytes(300, 9)] {
        let n = compress(&src, 5).len();
        let mut exact = vec![0u8; n];
        assert_eq!(compress_block(&src, &mut exact, 5), Ok(n));
        let mut short = vec![0u8; n - 1];
        assert_eq!(
            compress_block(&src, &mut short, 5),
            Err(Error::DstTooSmall { needed: n, available: n - 1 })
        );
    }
}
