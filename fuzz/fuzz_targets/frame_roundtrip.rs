#![no_main]
use libfuzzer_sys::fuzz_target;
use zyphrax::{compress_to_vec, decompress_to_vec, frame_bound, ChecksumKind, Params};

fuzz_target!(|input: &[u8]| {
    // Two selector bytes: level/checksum and block size.
    if input.len() < 2 {
        return;
    }
    let (sel, data) = input.split_at(2);
    let checksum = match sel[0] >> 6 {
        0 => ChecksumKind::None,
        1 => ChecksumKind::Xxh32,
        _ => ChecksumKind::Xxh64,
    };
    let params = Params::default()
        .with_level(u32::from(sel[0] % 9) + 1)
        .with_block_size(64 + usize::from(sel[1]) * 64)
        .with_checksum(checksum)
        .with_workers(1 + usize::from(sel[1] & 1));

    let frame = compress_to_vec(data, &params).expect("valid params");
    assert!(frame.len() <= frame_bound(data.len(), &params).expect("representable bound"));
    let recovered = decompress_to_vec(&frame).expect("own frame must decode");
    assert_eq!(recovered, data);
});
