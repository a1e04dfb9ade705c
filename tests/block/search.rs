// Hash-chain match finder: candidate order, tie-breaking, limits.

use zyphrax::block::search::{is_worthwhile, HashChain, Match};
use zyphrax::block::types::level_params;

fn prepared(src: &[u8]) -> HashChain {
    let mut hc = HashChain::new();
    hc.reset(src.len());
    hc
}

#[test]
fn distance_is_within_block_prefix() {
    let src = b"0123456789".repeat(30);
    let p = level_params(9).unwrap();
    let mut hc = prepared(&src);
    for pos in 0..src.len() {
        if let Some(m) = hc.find_best(&src, pos, &p) {
            assert!(m.distance >= 1 && m.distance <= pos, "pos {pos}: {m:?}");
            assert!(pos + m.len <= src.len());
            assert_eq!(src[pos - m.distance..pos - m.distance + m.len], src[pos..pos + m.len]);
        }
    }
}

#[test]
fn period_ten_repeat_is_found_at_nearest_period() {
    let src = b"0123456789".repeat(30);
    let p = level_params(3).unwrap();
    let mut hc = prepared(&src);
    let m = hc.find_best(&src, 100, &p).unwrap();
    assert_eq!(m.distance, 10);
    // Extension runs to the end of the block, past nice_length.
    assert_eq!(m.len, src.len() - 100);
}

#[test]
fn reset_forgets_previous_block() {
    let a = b"abcdefgh".repeat(4);
    let b = b"zyxwvuts-abcdefgh";
    let p = level_params(5).unwrap();
    let mut hc = prepared(&a);
    assert!(hc.find_best(&a, 8, &p).is_some());
    hc.reset(b.len());
    // "abcdefgh" appears only once in `b`; nothing from `a` may leak in.
    assert_eq!(hc.find_best(b, 9, &p), None);
}

#[test]
fn net_gain_prefers_cheap_distance() {
    let near = Match { len: 10, distance: 100 };
    let far = Match { len: 11, distance: 20_000 };
    assert!(near.gain() > far.gain());
}

#[test]
fn min_match_depends_on_level() {
    let l1 = level_params(1).unwrap();
    let l3 = level_params(3).unwrap();
    assert!(!is_worthwhile(5, 8, l1.min_match));
    assert!(is_worthwhile(5, 8, l3.min_match));
}
