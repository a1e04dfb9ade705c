// Frame header layout, header check and compress bounds.

use zyphrax::frame::header::{compress_bound, frame_bound, header_check, parse_header, write_header};
use zyphrax::frame::{
    FrameInfo, Params, FRAME_HEADER_SIZE, HEADER_CHECK_OFFSET, MAGIC, MAX_TRAILER_SIZE,
};
use zyphrax::{ChecksumKind, Error, ErrorKind};

#[test]
fn layout_of_a_written_header() {
    let info = FrameInfo {
        level: 9,
        block_size: 0x0001_0000,
        checksum: ChecksumKind::Xxh32,
        content_size: 0x0102_0304_0506,
    };
    let mut h = [0u8; FRAME_HEADER_SIZE];
    write_header(&info, &mut h).unwrap();
    assert_eq!(&h[0..4], &MAGIC);
    assert_eq!(h[4], 1, "version");
    assert_eq!(h[5], 1, "flags: xxh32");
    assert_eq!(h[6], 9, "level");
    assert_eq!(&h[7..11], &[0x00, 0x00, 0x01, 0x00]);
    assert_eq!(&h[11..19], &[0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00]);
    let stored = u32::from_le_bytes(h[HEADER_CHECK_OFFSET..].try_into().unwrap());
    assert_eq!(stored, header_check(&h[4..HEADER_CHECK_OFFSET]));
}

fn sealed_info() -> FrameInfo {
    FrameInfo { level: 3, block_size: 65_536, checksum: ChecksumKind::None, content_size: 1000 }
}

#[test]
fn bit_flips_in_magic_version_and_check_are_detected() {
    let info = sealed_info();
    let mut h = [0u8; FRAME_HEADER_SIZE];
    write_header(&info, &mut h).unwrap();
    for byte in [0usize, 1, 2, 3, 4, FRAME_HEADER_SIZE - 1] {
        for bit in 0..8 {
            let mut bad = h;
            bad[byte] ^= 1 << bit;
            match parse_header(&bad) {
                Ok(parsed) => panic!("flip {byte}:{bit} accepted as {parsed:?}"),
                Err(e) => assert_eq!(e.kind(), ErrorKind::Format, "flip {byte}:{bit} gave {e:?}"),
            }
        }
    }
}

#[test]
fn field_changes_without_resealing_fail_the_check() {
    let info = sealed_info();
    let mut h = [0u8; FRAME_HEADER_SIZE];
    write_header(&info, &mut h).unwrap();
    // Every value of every checked field byte other than the written one.
    for i in 5..HEADER_CHECK_OFFSET {
        for v in 0..=255u8 {
            if v == h[i] {
                continue;
            }
            let mut bad = h;
            bad[i] = v;
            let got = parse_header(&bad);
            assert_eq!(got, Err(Error::HeaderChecksumInvalid), "byte {i} = {v:#04x}");
        }
    }
}

#[test]
fn foreign_data_is_not_a_frame() {
    let foreign = b"\x04\x22\x4D\x18rest-of-a-foreign-frame";
    assert_eq!(parse_header(foreign), Err(Error::FrameTypeUnknown));
    assert_eq!(parse_header(b""), Err(Error::FrameTruncated));
}

#[test]
fn bound_covers_every_block_size_and_trailer() {
    let n = 200_000;
    let worst = compress_bound(n, 64).unwrap();
    for bs in [64usize, 100, 4096, 65_536, 1 << 24] {
        for kind in [ChecksumKind::None, ChecksumKind::Xxh32, ChecksumKind::Xxh64] {
            let p = Params::default().with_block_size(bs).with_checksum(kind);
            let exact = frame_bound(n, &p).unwrap();
            assert!(exact <= compress_bound(n, bs).unwrap());
            assert!(exact <= worst);
        }
    }
}

#[test]
fn empty_input_bound_is_header_plus_trailer() {
    assert_eq!(compress_bound(0, 64).unwrap(), FRAME_HEADER_SIZE + MAX_TRAILER_SIZE);
}

#[test]
fn bound_errors_are_config_errors() {
    let e = compress_bound(1, 63).unwrap_err();
    assert_eq!(e, Error::BlockSizeInvalid(63));
    assert_eq!(e.kind(), ErrorKind::Config);
    let e = compress_bound(usize::MAX - 10, 1 << 24).unwrap_err();
    assert_eq!(e, Error::SrcSizeTooLarge);
}
