// Block header layout, varint helpers and the per-level search table.

use zyphrax::block::types::{
    level_params, packed_ceiling, push_varint, read_varint, varint_len, BlockHeader, BlockMode,
    BLOCK_HEADER_SIZE, LEVEL_TABLE, MINMATCH, ML_MASK, RUN_MASK,
};
use zyphrax::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(BLOCK_HEADER_SIZE, 9);
    assert_eq!(MINMATCH, 4);
    assert_eq!(ML_MASK, 15);
    assert_eq!(RUN_MASK, 15);
}

#[test]
fn block_mode_wire_values() {
    assert_eq!(BlockMode::Stored as u8, 0);
    assert_eq!(BlockMode::Lz as u8, 1);
    assert_eq!(BlockMode::LzHuffman as u8, 2);
    for v in 3u8..=255 {
        assert_eq!(BlockMode::try_from(v), Err(Error::BlockModeInvalid(v)));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_is_little_endian() {
    let hdr =
        BlockHeader { mode: BlockMode::LzHuffman, original_len: 0x0001_0203, encoded_len: 0x0A0B };
    let mut buf = [0u8; BLOCK_HEADER_SIZE];
    hdr.write(&mut buf);
    assert_eq!(buf, [2, 0x03, 0x02, 0x01, 0x00, 0x0B, 0x0A, 0x00, 0x00]);
    assert_eq!(BlockHeader::parse(&buf).unwrap(), hdr);
}

#[test]
fn header_parse_ignores_following_bytes() {
    let hdr = BlockHeader { mode: BlockMode::Stored, original_len: 3, encoded_len: 3 };
    let mut buf = vec![0u8; BLOCK_HEADER_SIZE];
    hdr.write(&mut buf);
    buf.extend_from_slice(b"xyz");
    assert_eq!(BlockHeader::parse(&buf).unwrap(), hdr);
}

// ─────────────────────────────────────────────────────────────────────────────
// Varints
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn varint_known_encodings() {
    let cases: &[(usize, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7F]),
        (128, &[0x80, 0x01]),
        (300, &[0xAC, 0x02]),
        (65_531, &[0xFB, 0xFF, 0x03]),
    ];
    for &(value, bytes) in cases {
        let mut out = Vec::new();
        push_varint(&mut out, value);
        assert_eq!(out, bytes, "value {value}");
        assert_eq!(varint_len(value), bytes.len());
        let mut pos = 0;
        assert_eq!(read_varint(bytes, &mut pos), Some(value));
    }
}

#[test]
fn varint_reads_advance_cursor() {
    let bytes = [0x05, 0x80, 0x01, 0x7F];
    let mut pos = 0;
    assert_eq!(read_varint(&bytes, &mut pos), Some(5));
    assert_eq!(read_varint(&bytes, &mut pos), Some(128));
    assert_eq!(read_varint(&bytes, &mut pos), Some(127));
    assert_eq!(pos, bytes.len());
    assert_eq!(read_varint(&bytes, &mut pos), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Level table
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn level_table_matches_documented_values() {
    let expected = [
        (1u32, 1u32, false, 6usize, 16usize, false),
        (2, 4, false, 5, 32, false),
        (3, 8, false, 4, 64, false),
        (4, 16, true, 4, 64, false),
        (5, 32, true, 4, 128, false),
        (6, 64, true, 4, 256, false),
        (7, 128, true, 4, 512, true),
        (8, 256, true, 4, 1024, true),
        (9, 1024, true, 4, 4096, true),
    ];
    assert_eq!(LEVEL_TABLE.len(), expected.len());
    for (level, chain, lazy, min_match, nice, entropy) in expected {
        let p = level_params(level).unwrap();
        assert_eq!(p.max_chain, chain, "level {level}");
        assert_eq!(p.lazy, lazy, "level {level}");
        assert_eq!(p.min_match, min_match, "level {level}");
        assert_eq!(p.nice_length, nice, "level {level}");
        assert_eq!(p.entropy, entropy, "level {level}");
    }
}

#[test]
fn levels_outside_range_are_rejected_not_clamped() {
    for level in [0u32, 10, 12, u32::MAX] {
        assert_eq!(level_params(level), Err(Error::LevelInvalid(level)));
    }
}

#[test]
fn packed_ceiling_leaves_room_above_original() {
    for n in [1usize, 64, 4096, 65_536] {
        assert!(packed_ceiling(n) > n);
    }
}
