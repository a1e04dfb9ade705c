// Block decompression: every malformed input is rejected without panicking.

use zyphrax::block::{
    block_bound, compress_block, decompress_block, BlockHeader, BlockMode, BLOCK_HEADER_SIZE,
};
use zyphrax::Error;

fn make_block(mode: BlockMode, original_len: usize, payload: &[u8]) -> Vec<u8> {
    let mut v = vec![0u8; BLOCK_HEADER_SIZE];
    BlockHeader { mode, original_len, encoded_len: payload.len() }.write(&mut v);
    v.extend_from_slice(payload);
    v
}

fn decode(block: &[u8], original_len: usize) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; original_len];
    decompress_block(block, &mut out, 4).map(|_| out)
}

#[test]
fn stored_block_copies_payload() {
    let block = make_block(BlockMode::Stored, 5, b"hello");
    assert_eq!(decode(&block, 5).unwrap(), b"hello");
}

#[test]
fn lz_block_with_overlapping_match() {
    // 'z' then a 9-byte match at distance 1.
    let block = make_block(BlockMode::Lz, 10, &[0x15, b'z', 0x01]);
    assert_eq!(decode(&block, 10).unwrap(), b"zzzzzzzzzz");
}

#[test]
fn lz_block_with_extended_lengths() {
    // 16 literals (15 + 1), then a 19 + 100 byte match at distance 16.
    let mut payload = vec![0xFF, 0x01];
    payload.extend(b'a'..=b'p');
    payload.push(16);
    payload.push(100);
    let block = make_block(BlockMode::Lz, 16 + 119, &payload);
    let out = decode(&block, 16 + 119).unwrap();
    let expected: Vec<u8> = (b'a'..=b'p').cycle().take(135).collect();
    assert_eq!(out, expected);
}

#[test]
fn corrupt_streams_report_the_block_index() {
    let cases: &[&[u8]] = &[
        &[0x10, b'a', 0x00],       // distance 0
        &[0x10, b'a', 0x02],       // distance beyond decoded prefix
        &[0x1F, b'a', 0x01, 0xFF], // truncated match extension
        &[0xF0],                   // truncated literal extension
        &[0x10, b'a', 0x01, 0x00], // trailing byte after the last sequence
    ];
    for payload in cases {
        let block = make_block(BlockMode::Lz, 5, payload);
        assert_eq!(decode(&block, 5), Err(Error::BlockCorrupt { index: 4 }), "{payload:02X?}");
    }
}

#[test]
fn match_running_past_block_end_is_corrupt() {
    let block = make_block(BlockMode::Lz, 6, &[0x12, b'a', 0x01]);
    assert_eq!(decode(&block, 6), Err(Error::BlockCorrupt { index: 4 }));
}

#[test]
fn mode_length_rules() {
    let block = make_block(BlockMode::Stored, 6, b"hello");
    assert_eq!(decode(&block, 6), Err(Error::BlockCorrupt { index: 4 }));
    let block = make_block(BlockMode::Lz, 3, &[0x30, b'a', b'b', b'c']);
    assert_eq!(decode(&block, 3), Err(Error::BlockCorrupt { index: 4 }));
}

#[test]
fn unknown_mode_is_rejected() {
    let mut block = make_block(BlockMode::Stored, 2, b"ok");
    block[0] = 9;
    assert_eq!(decode(&block, 2), Err(Error::BlockModeInvalid(9)));
}

#[test]
fn huffman_block_survives_roundtrip_and_rejects_damage() {
    let mut x = 1u32;
    let src: Vec<u8> = (0..6000)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            b"eeeeettaaoinsh"[(x >> 16) as usize % 14]
        })
        .collect();
    let mut block = vec![0u8; block_bound(src.len())];
    let n = compress_block(&src, &mut block, 9).unwrap();
    block.truncate(n);
    assert_eq!(block[0], BlockMode::LzHuffman as u8);
    assert_eq!(decode(&block, src.len()).unwrap(), src);

    // Zero the code-length table: no symbol can be decoded.
    let mut bad = block.clone();
    let table = BLOCK_HEADER_SIZE + 4..BLOCK_HEADER_SIZE + 4 + 128;
    bad[table].fill(0);
    assert_eq!(decode(&bad, src.len()), Err(Error::BlockCorrupt { index: 4 }));
}

#[test]
fn every_truncation_of_a_valid_block_fails_cleanly() {
    let src = b"truncate me, truncate me, truncate me!".repeat(5);
    let mut block = vec![0u8; block_bound(src.len())];
    let n = compress_block(&src, &mut block, 6).unwrap();
    for cut in 0..n {
        assert!(decode(&block[..cut], src.len()).is_err(), "cut at {cut}");
    }
}
