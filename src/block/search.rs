//! Hash-chain match finder.
//!
//! Performs two interleaved operations at each input position:
//!
//! 1. **Insertion** ([`HashChain::insert`]): link every position in
//!    `[next_to_insert, pos)` into its hash bucket, so candidates are always
//!    strictly before `pos`.
//! 2. **Search** ([`HashChain::find_best`]): walk the bucket from the most
//!    recent candidate backwards, keeping the longest match seen. Equal
//!    lengths keep the earlier-found (nearer) candidate.
//!
//! Matches never reach outside the block being compressed.

use super::types::{count, hash4, hash_log_for, read32, varint_len, LevelParams, MINMATCH};

/// A back-reference candidate: copy `len` bytes from `distance` bytes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub len: usize,
    pub distance: usize,
}

impl Match {
    /// Bytes saved by this match over emitting the same bytes as literals,
    /// ignoring the shared token byte.
    #[inline]
    pub fn gain(&self) -> isize {
        self.len as isize - varint_len(self.distance) as isize
    }
}

/// Whether a match is long enough to be emitted at this level.
///
/// A match must beat the literal bytes it replaces: the token plus the
/// distance varint must be shorter than `len`.
#[inline]
pub fn is_worthwhile(len: usize, distance: usize, min_match: usize) -> bool {
    len >= min_match && len > 1 + varint_len(distance)
}

// ─────────────────────────────────────────────────────────────────────────────
// Hash chain state
// ─────────────────────────────────────────────────────────────────────────────

/// Hash and chain tables for one block.
///
/// Both tables store `position + 1` so that 0 can mean "empty".
#[derive(Debug, Default)]
pub struct HashChain {
    hash_log: u32,
    head: Vec<u32>,
    chain: Vec<u32>,
    next_to_insert: usize,
}

impl HashChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the tables for a block of `block_len` bytes, reusing the
    /// existing allocations where possible.
    pub fn reset(&mut self, block_len: usize) {
        self.hash_log = hash_log_for(block_len);
        self.head.clear();
        self.head.resize(1usize << self.hash_log, 0);
        self.chain.clear();
        self.chain.resize(block_len, 0);
        self.next_to_insert = 0;
    }

    /// Link every position in `[next_to_insert, target)` that still has four
    /// bytes ahead of it.
    #[inline]
    pub fn insert(&mut self, src: &[u8], target: usize) {
        let last = src.len().saturating_sub(MINMATCH - 1).min(target);
        let mut idx = self.next_to_insert;
        while idx < last {
            let h = hash4(read32(src, idx), self.hash_log) as usize;
            self.chain[idx] = self.head[h];
            self.head[h] = idx as u32 + 1;
            idx += 1;
        }
        self.next_to_insert = self.next_to_insert.max(target);
    }

    /// Longest worthwhile match for `src[pos..]`, or `None`.
    ///
    /// Inserts all earlier positions first. At most `params.max_chain`
    /// candidates are examined; a match of `params.nice_length` or more ends
    /// the walk early.
    pub fn find_best(&mut self, src: &[u8], pos: usize, params: &LevelParams) -> Option<Match> {
        self.insert(src, pos);
        if pos + MINMATCH > src.len() {
            return None;
        }

        let end = src.len();
        let seq = read32(src, pos);
        let h = hash4(seq, self.hash_log) as usize;
        let mut cand = self.head[h];
        let mut attempts = params.max_chain;
        let mut best: Option<Match> = None;

        while cand != 0 && attempts > 0 {
            attempts -= 1;
            let c = cand as usize - 1;
            debug_assert!(c < pos);
            if read32(src, c) == seq {
                let len = MINMATCH + count(src, c + MINMATCH, pos + MINMATCH, end);
                let distance = pos - c;
                let longer = best.map_or(true, |b| len > b.len);
                if longer && is_worthwhile(len, distance, params.min_match) {
                    best = Some(Match { len, distance });
                    if len >= params.nice_length || pos + len == end {
                        break;
                    }
                }
            }
            cand = self.chain[c];
        }
        best
    }
}
