#![no_main]
use libfuzzer_sys::fuzz_target;
use zyphrax::{decompress_with_options, decompress_to_vec, DecompressOptions};

fuzz_target!(|data: &[u8]| {
    // Raw input, then the same bytes behind a valid magic so the fuzzer
    // spends its time past the first check.
    let _ = decompress_to_vec(data);

    let mut framed = b"ZYFX".to_vec();
    framed.extend_from_slice(data);
    let _ = decompress_to_vec(&framed);

    let mut dst = vec![0u8; 1 << 16];
    if let Ok(n) = decompress_with_options(&framed, &mut dst, &DecompressOptions { workers: 2 }) {
        assert!(n <= dst.len());
    }
});
