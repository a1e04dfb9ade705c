// Decode-side validation order and error taxonomy.

use zyphrax::frame::header::seal_header;
use zyphrax::frame::{compress_to_vec, decompress, decompress_to_vec, get_frame_info, Params};
use zyphrax::frame::FRAME_HEADER_SIZE;
use zyphrax::{ChecksumKind, Error, ErrorKind};

fn sample_frame(kind: ChecksumKind) -> (Vec<u8>, Vec<u8>) {
    let src = b"sample payload with some repetition: abcabcabcabcabc ".repeat(40);
    let params = Params::default().with_block_size(256).with_checksum(kind);
    let frame = compress_to_vec(&src, &params).unwrap();
    (src, frame)
}

fn reseal(frame: &mut [u8]) {
    seal_header(frame);
}

#[test]
fn frame_info_reports_header_fields() {
    let (src, frame) = sample_frame(ChecksumKind::Xxh64);
    let info = get_frame_info(&frame).unwrap();
    assert_eq!(info.content_size, src.len() as u64);
    assert_eq!(info.block_size, 256);
    assert_eq!(info.level, 3);
    assert_eq!(info.checksum, ChecksumKind::Xxh64);
    assert_eq!(info.trailer_size(), 8);
}

#[test]
fn header_errors() {
    let (_, frame) = sample_frame(ChecksumKind::None);

    let mut bad = frame.clone();
    bad[..4].copy_from_slice(b"ZYFY");
    assert_eq!(decompress_to_vec(&bad), Err(Error::FrameTypeUnknown));

    let mut bad = frame.clone();
    bad[4] = 9;
    assert_eq!(decompress_to_vec(&bad), Err(Error::VersionUnsupported(9)));

    let mut bad = frame.clone();
    bad[5] = 0x04;
    reseal(&mut bad);
    assert_eq!(decompress_to_vec(&bad), Err(Error::ReservedFlagSet));

    let mut bad = frame.clone();
    bad[19] ^= 0xFF;
    assert_eq!(decompress_to_vec(&bad), Err(Error::HeaderChecksumInvalid));

    assert_eq!(decompress_to_vec(&frame[..FRAME_HEADER_SIZE - 1]), Err(Error::FrameTruncated));
}

#[test]
fn content_size_mismatch_is_detected() {
    let (src, frame) = sample_frame(ChecksumKind::None);

    // Declared size smaller than what the blocks hold.
    let mut bad = frame.clone();
    bad[11..19].copy_from_slice(&(src.len() as u64 - 1).to_le_bytes());
    reseal(&mut bad);
    assert!(matches!(decompress_to_vec(&bad), Err(Error::FrameSizeWrong)));

    // Declared size larger than what the blocks hold: the short tail block
    // is no longer the last one.
    let mut bad = frame.clone();
    bad[11..19].copy_from_slice(&(src.len() as u64 + 1).to_le_bytes());
    reseal(&mut bad);
    let tail = src.len() / 256;
    assert_eq!(decompress_to_vec(&bad), Err(Error::BlockCorrupt { index: tail }));
}

#[test]
fn short_block_before_the_last_is_corrupt() {
    let (src, frame) = sample_frame(ChecksumKind::Xxh32);
    assert!(src.len() > 512);
    // 256-byte blocks under a header that now declares 512-byte blocks.
    let mut bad = frame.clone();
    bad[7..11].copy_from_slice(&512u32.to_le_bytes());
    reseal(&mut bad);
    assert_eq!(decompress_to_vec(&bad), Err(Error::BlockCorrupt { index: 0 }));

    // The same frame with the right block size still decodes.
    assert_eq!(decompress_to_vec(&frame).unwrap(), src);
}

#[test]
fn checksum_kind_change_is_detected() {
    // Flip the kind from none to xxh32: the last 4 bytes of block data become
    // the "trailer" and the block walk comes up short.
    let (_, frame) = sample_frame(ChecksumKind::None);
    let mut bad = frame.clone();
    bad[5] = ChecksumKind::Xxh32 as u8;
    reseal(&mut bad);
    let err = decompress_to_vec(&bad).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn single_byte_corruption_never_goes_unnoticed_with_checksum() {
    let (src, frame) = sample_frame(ChecksumKind::Xxh32);
    for i in FRAME_HEADER_SIZE..frame.len() {
        let mut bad = frame.clone();
        bad[i] ^= 0x01;
        match decompress_to_vec(&bad) {
            Ok(out) => {
                panic!("corruption at {i} accepted ({} bytes, equal: {})", out.len(), out == src)
            }
            Err(e) => assert!(
                matches!(e.kind(), ErrorKind::Format | ErrorKind::Integrity),
                "byte {i}: {e:?}"
            ),
        }
    }
}

#[test]
fn capacity_is_checked_against_declared_size() {
    let (src, frame) = sample_frame(ChecksumKind::None);
    let mut dst = vec![0u8; src.len() - 1];
    let err = decompress(&frame, &mut dst).unwrap_err();
    assert_eq!(err, Error::DstTooSmall { needed: src.len(), available: src.len() - 1 });
    assert_eq!(err.kind(), ErrorKind::Capacity);

    let mut dst = vec![0u8; src.len()];
    assert_eq!(decompress(&frame, &mut dst), Ok(src.len()));
    assert_eq!(dst, src);
}
