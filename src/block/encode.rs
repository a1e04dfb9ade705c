//! Sequence encoder.
//!
//! Serialises one sequence (token byte, literal-length extension, literal
//! bytes, distance, match-length extension) onto a packed token stream:
//!
//! ```text
//! token   = (min(lit_len, 15) << 4) | min(match_len - 4, 15)
//! [varint lit_len - 15]          if the high nibble is 15
//! literals
//! varint distance                omitted for the literals-only last sequence
//! [varint match_len - 19]        if the low nibble is 15
//! ```
//!
//! The literals-only sequence closing a block has a low nibble of 0.

use super::search::Match;
use super::types::{push_varint, varint_len, MINMATCH, ML_BITS, ML_MASK, RUN_MASK};

/// Encoded size of a sequence with `lit_len` literals and an optional match.
#[inline]
pub fn sequence_size(lit_len: usize, m: Option<Match>) -> usize {
    let mut size = 1 + lit_len;
    if lit_len >= RUN_MASK as usize {
        size += varint_len(lit_len - RUN_MASK as usize);
    }
    if let Some(m) = m {
        size += varint_len(m.distance);
        let ml = m.len - MINMATCH;
        if ml >= ML_MASK as usize {
            size += varint_len(ml - ML_MASK as usize);
        }
    }
    size
}

#[inline]
fn push_token_and_literals(out: &mut Vec<u8>, literals: &[u8], ml_code: usize) {
    let lit_len = literals.len();
    let lit_code = lit_len.min(RUN_MASK as usize);
    out.push(((lit_code << ML_BITS) | ml_code) as u8);
    if lit_code == RUN_MASK as usize {
        push_varint(out, lit_len - RUN_MASK as usize);
    }
    out.extend_from_slice(literals);
}

/// Append a literal run followed by a back-reference.
#[inline]
pub fn push_sequence(out: &mut Vec<u8>, literals: &[u8], m: Match) {
    debug_assert!(m.len >= MINMATCH);
    debug_assert!(m.distance > 0);
    let ml = m.len - MINMATCH;
    push_token_and_literals(out, literals, ml.min(ML_MASK as usize));
    push_varint(out, m.distance);
    if ml >= ML_MASK as usize {
        push_varint(out, ml - ML_MASK as usize);
    }
}

/// Append the closing literals-only sequence. Nothing is written for an
/// empty run.
#[inline]
pub fn push_last_literals(out: &mut Vec<u8>, literals: &[u8]) {
    if !literals.is_empty() {
        push_token_and_literals(out, literals, 0);
    }
}
