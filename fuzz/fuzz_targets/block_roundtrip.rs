#![no_main]
use libfuzzer_sys::fuzz_target;
use zyphrax::block::{block_bound, compress_block, decompress_block};

fuzz_target!(|input: &[u8]| {
    // First byte picks the level, the rest is the block.
    let Some((&selector, data)) = input.split_first() else {
        return;
    };
    if data.is_empty() {
        return;
    }
    let level = u32::from(selector % 9) + 1;

    let mut block = vec![0u8; block_bound(data.len())];
    let n = compress_block(data, &mut block, level).expect("bound-sized buffer must suffice");

    let mut recovered = vec![0u8; data.len()];
    let consumed =
        decompress_block(&block[..n], &mut recovered, 0).expect("own output must decode");
    assert_eq!(consumed, n);
    assert_eq!(recovered, data, "block round-trip mismatch at level {level}");
});
