#![no_main]
use libfuzzer_sys::fuzz_target;
use zyphrax::block::decompress_block;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the block decoder. Errors are expected; panics
    // and out-of-bounds writes are not.
    for cap in [0usize, 64, 4096, data.len().saturating_mul(4).min(1 << 20)] {
        let mut dst = vec![0u8; cap];
        if let Ok(consumed) = decompress_block(data, &mut dst, 0) {
            assert!(consumed <= data.len());
        }
    }
});
