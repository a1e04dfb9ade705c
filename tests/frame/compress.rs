// Frame structure produced by compress().

use zyphrax::frame::{
    compress, compress_bound, compress_to_vec, get_frame_info, scan_blocks, Params,
};
use zyphrax::frame::{FRAME_HEADER_SIZE, MAGIC};
use zyphrax::block::{BlockMode, BLOCK_HEADER_SIZE};
use zyphrax::{ChecksumKind, Error};

fn text(n: usize) -> Vec<u8> {
    b"It was the best of times, it was the worst of times, it was the age of wisdom, "
        .iter()
        .copied()
        .cycle()
        .take(n)
        .collect()
}

#[test]
fn frame_starts_with_magic_and_ends_with_digest() {
    let src = text(5000);
    let p = Params::default().with_checksum(ChecksumKind::Xxh32);
    let frame = compress_to_vec(&src, &p).unwrap();
    assert_eq!(&frame[..4], &MAGIC);
    let digest = xxhash_rust::xxh32::xxh32(&src, 0);
    assert_eq!(&frame[frame.len() - 4..], &digest.to_le_bytes());
}

#[test]
fn xxh64_trailer_is_eight_bytes() {
    let src = text(777);
    let p = Params::default().with_checksum(ChecksumKind::Xxh64);
    let frame = compress_to_vec(&src, &p).unwrap();
    let digest = xxhash_rust::xxh64::xxh64(&src, 0);
    assert_eq!(&frame[frame.len() - 8..], &digest.to_le_bytes());
}

#[test]
fn block_count_and_sizes_follow_block_size() {
    let src = text(1000);
    let p = Params::default().with_block_size(64);
    let frame = compress_to_vec(&src, &p).unwrap();
    let info = get_frame_info(&frame).unwrap();
    let layout = scan_blocks(&frame, &info).unwrap();
    assert_eq!(layout.blocks.len(), 16);
    for b in &layout.blocks[..15] {
        assert_eq!(b.header.original_len, 64);
    }
    assert_eq!(layout.blocks[15].header.original_len, 1000 - 15 * 64);
}

#[test]
fn exactly_one_block() {
    let src = text(4096);
    let p = Params::default().with_block_size(4096);
    let frame = compress_to_vec(&src, &p).unwrap();
    let layout = scan_blocks(&frame, &get_frame_info(&frame).unwrap()).unwrap();
    assert_eq!(layout.blocks.len(), 1);
    assert_eq!(layout.blocks[0].payload_offset, FRAME_HEADER_SIZE + BLOCK_HEADER_SIZE);
}

#[test]
fn random_input_produces_stored_blocks_only() {
    let mut x = 0xDEAD_BEEFu32;
    let src: Vec<u8> = (0..20_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect();
    for level in [1u32, 9] {
        let p = Params::default().with_level(level).with_block_size(4096);
        let frame = compress_to_vec(&src, &p).unwrap();
        let layout = scan_blocks(&frame, &get_frame_info(&frame).unwrap()).unwrap();
        assert!(layout.blocks.iter().all(|b| b.header.mode == BlockMode::Stored));
        let overhead = FRAME_HEADER_SIZE + layout.blocks.len() * BLOCK_HEADER_SIZE;
        assert_eq!(frame.len(), src.len() + overhead);
    }
}

#[test]
fn compress_into_exact_bound_buffer() {
    let src = text(70_000);
    let bound = compress_bound(src.len(), 65_536).unwrap();
    let mut dst = vec![0u8; bound];
    let n = compress(&src, &mut dst, &Params::default()).unwrap();
    assert!(n < src.len() / 2);
}

#[test]
fn config_errors_come_first() {
    let mut dst = [0u8; 8];
    let p = Params::default().with_block_size(0);
    assert_eq!(compress(b"abc", &mut dst, &p), Err(Error::BlockSizeInvalid(0)));
    let p = Params::default().with_workers(1000);
    assert_eq!(compress(b"abc", &mut dst, &p), Err(Error::WorkersInvalid(1000)));
}
