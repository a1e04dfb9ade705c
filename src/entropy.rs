//! Canonical Huffman stage applied to packed LZ token streams.
//!
//! Payload layout of an `LzHuffman` block:
//!
//! | Offset | Size | Field                                                    |
//! |--------|------|----------------------------------------------------------|
//! | 0      | 4    | `packed_len`: length of the token stream, u32 LE          |
//! | 4      | 128  | code lengths of bytes 0..=255, two 4-bit nibbles per byte |
//! | 132    | ..   | MSB-first canonical codes of the `packed_len` symbols     |
//!
//! Nibble `2*i` (high) and `2*i + 1` (low) of table byte `i` hold the code
//! length of symbols `2*i` and `2*i + 1`; 0 means the symbol is absent. Code
//! lengths never exceed [`MAX_CODE_BITS`]. Codes are assigned canonically:
//! shorter codes first, ties by increasing symbol value.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Longest code length a table entry can express (one nibble).
pub const MAX_CODE_BITS: usize = 15;

/// Bytes used by the packed code-length table.
pub const TABLE_SIZE: usize = 128;

/// Fixed prefix of every Huffman payload (`packed_len` + table).
pub const HUFFMAN_HEADER_SIZE: usize = 4 + TABLE_SIZE;

const SYMBOLS: usize = 256;

// ─────────────────────────────────────────────────────────────────────────────
// Code construction
// ─────────────────────────────────────────────────────────────────────────────

/// Build length-limited Huffman code lengths for `freq`.
///
/// Trees deeper than [`MAX_CODE_BITS`] are rebuilt from flattened frequencies
/// until they fit. A lone symbol gets length 1.
fn build_code_lengths(freq: &[u32; SYMBOLS]) -> [u8; SYMBOLS] {
    let mut weights = *freq;
    loop {
        let (lengths, depth) = huffman_tree_depths(&weights);
        if depth <= MAX_CODE_BITS {
            return lengths;
        }
        for w in weights.iter_mut().filter(|w| **w != 0) {
            *w = (*w >> 1) | 1;
        }
    }
}

/// Plain Huffman tree; returns per-symbol depths and the maximum depth.
fn huffman_tree_depths(freq: &[u32; SYMBOLS]) -> ([u8; SYMBOLS], usize) {
    #[derive(Clone, Copy)]
    struct Node {
        children: Option<(usize, usize)>,
        symbol: usize,
    }

    let mut heap: BinaryHeap<(Reverse<u64>, Reverse<usize>)> = BinaryHeap::new();
    let mut nodes: Vec<Node> = Vec::with_capacity(2 * SYMBOLS);
    for (symbol, &weight) in freq.iter().enumerate() {
        if weight != 0 {
            heap.push((Reverse(u64::from(weight)), Reverse(nodes.len())));
            nodes.push(Node { children: None, symbol });
        }
    }

    let mut lengths = [0u8; SYMBOLS];
    match heap.len() {
        0 => return (lengths, 0),
        1 => {
            lengths[nodes[0].symbol] = 1;
            return (lengths, 1);
        }
        _ => {}
    }

    while heap.len() > 1 {
        let (Some((Reverse(wa), Reverse(a))), Some((Reverse(wb), Reverse(b)))) =
            (heap.pop(), heap.pop())
        else {
            break;
        };
        heap.push((Reverse(wa + wb), Reverse(nodes.len())));
        nodes.push(Node { children: Some((a, b)), symbol: 0 });
    }

    let root = nodes.len() - 1;
    let mut max_depth = 0usize;
    let mut stack = vec![(root, 0usize)];
    while let Some((idx, depth)) = stack.pop() {
        match nodes[idx].children {
            Some((l, r)) => {
                stack.push((l, depth + 1));
                stack.push((r, depth + 1));
            }
            None => {
                // Depths beyond a nibble are only reported, never stored.
                lengths[nodes[idx].symbol] = depth.min(u8::MAX as usize) as u8;
                max_depth = max_depth.max(depth);
            }
        }
    }
    (lengths, max_depth)
}

/// Canonical `(code, length)` pairs for a length table.
fn canonical_codes(lengths: &[u8; SYMBOLS]) -> [(u16, u8); SYMBOLS] {
    let mut bl_count = [0u16; MAX_CODE_BITS + 1];
    for &len in lengths.iter().filter(|&&l| l != 0) {
        bl_count[len as usize] += 1;
    }
    let mut next_code = [0u16; MAX_CODE_BITS + 1];
    let mut code = 0u16;
    for bits in 1..=MAX_CODE_BITS {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
    }
    let mut out = [(0u16, 0u8); SYMBOLS];
    for (symbol, &len) in lengths.iter().enumerate() {
        if len != 0 {
            out[symbol] = (next_code[len as usize], len);
            next_code[len as usize] += 1;
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

struct BitWriter {
    out: Vec<u8>,
    acc: u64,
    nbits: u32,
}

impl BitWriter {
    fn new(out: Vec<u8>) -> Self {
        BitWriter { out, acc: 0, nbits: 0 }
    }

    #[inline]
    fn put(&mut self, code: u16, len: u8) {
        self.acc = (self.acc << len) | u64::from(code);
        self.nbits += u32::from(len);
        while self.nbits >= 8 {
            self.nbits -= 8;
            self.out.push((self.acc >> self.nbits) as u8);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.nbits > 0 {
            self.out.push((self.acc << (8 - self.nbits)) as u8);
        }
        self.out
    }
}

/// Huffman-code `packed` into a complete payload.
///
/// Returns `None` when the result would not be strictly shorter than
/// `ceiling`, or when `packed` is empty.
pub fn encode(packed: &[u8], ceiling: usize) -> Option<Vec<u8>> {
    if packed.is_empty() || packed.len() > u32::MAX as usize {
        return None;
    }
    let mut freq = [0u32; SYMBOLS];
    for &b in packed {
        freq[b as usize] += 1;
    }
    let lengths = build_code_lengths(&freq);
    let codes = canonical_codes(&lengths);

    let total_bits: u64 = freq
        .iter()
        .zip(lengths.iter())
        .map(|(&f, &l)| u64::from(f) * u64::from(l))
        .sum();
    let encoded_len = HUFFMAN_HEADER_SIZE as u64 + total_bits.div_ceil(8);
    if encoded_len >= ceiling as u64 {
        return None;
    }

    let mut out = Vec::with_capacity(encoded_len as usize);
    out.extend_from_slice(&(packed.len() as u32).to_le_bytes());
    for pair in lengths.chunks_exact(2) {
        out.push((pair[0] << 4) | pair[1]);
    }
    let mut bits = BitWriter::new(out);
    for &b in packed {
        let (code, len) = codes[b as usize];
        bits.put(code, len);
    }
    let out = bits.finish();
    debug_assert_eq!(out.len() as u64, encoded_len);
    Some(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical decoding table: symbol counts per length and symbols in code order.
struct Decoder {
    counts: [u16; MAX_CODE_BITS + 1],
    symbols: Vec<u8>,
    max_bits: usize,
}

fn build_decoder(lengths: &[u8; SYMBOLS]) -> Option<Decoder> {
    let mut counts = [0u16; MAX_CODE_BITS + 1];
    for &len in lengths.iter().filter(|&&l| l != 0) {
        counts[len as usize] += 1;
    }

    // Reject over-subscribed tables; incomplete ones are allowed (single symbol).
    let mut left: i32 = 1;
    for &count in counts.iter().skip(1) {
        left = (left << 1) - i32::from(count);
        if left < 0 {
            return None;
        }
    }

    let mut offsets = [0usize; MAX_CODE_BITS + 2];
    for bits in 1..=MAX_CODE_BITS {
        offsets[bits + 1] = offsets[bits] + counts[bits] as usize;
    }
    let total = offsets[MAX_CODE_BITS + 1];
    if total == 0 {
        return None;
    }
    let mut symbols = vec![0u8; total];
    let mut max_bits = 0usize;
    for (symbol, &len) in lengths.iter().enumerate() {
        if len != 0 {
            let len = len as usize;
            symbols[offsets[len]] = symbol as u8;
            offsets[len] += 1;
            max_bits = max_bits.max(len);
        }
    }
    Some(Decoder { counts, symbols, max_bits })
}

struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl BitReader<'_> {
    #[inline]
    fn read_bit(&mut self) -> Option<u32> {
        let byte = *self.data.get(self.bit_pos >> 3)?;
        let bit = (byte >> (7 - (self.bit_pos & 7))) & 1;
        self.bit_pos += 1;
        Some(u32::from(bit))
    }
}

#[inline]
fn decode_symbol(bits: &mut BitReader<'_>, dec: &Decoder) -> Option<u8> {
    let mut code = 0u32;
    let mut first = 0u32;
    let mut index = 0usize;
    for len in 1..=dec.max_bits {
        code |= bits.read_bit()?;
        let count = u32::from(dec.counts[len]);
        if code < first + count {
            return dec.symbols.get(index + (code - first) as usize).copied();
        }
        index += count as usize;
        first = (first + count) << 1;
        code <<= 1;
    }
    None
}

/// Recover the packed token stream from a Huffman payload.
///
/// `max_packed` bounds the declared stream length before anything is
/// allocated. Fails on a malformed table, a truncated bitstream, or whole
/// unused bytes after the last code.
pub fn decode(payload: &[u8], max_packed: usize) -> Option<Vec<u8>> {
    if payload.len() < HUFFMAN_HEADER_SIZE {
        return None;
    }
    let packed_len =
        u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;
    let stream = &payload[HUFFMAN_HEADER_SIZE..];
    // Every symbol costs at least one bit.
    if packed_len == 0 || packed_len > max_packed || packed_len > stream.len().saturating_mul(8) {
        return None;
    }

    let mut lengths = [0u8; SYMBOLS];
    for (i, &b) in payload[4..HUFFMAN_HEADER_SIZE].iter().enumerate() {
        lengths[2 * i] = b >> 4;
        lengths[2 * i + 1] = b & 0x0F;
    }
    let dec = build_decoder(&lengths)?;

    let mut bits = BitReader { data: stream, bit_pos: 0 };
    let mut out = Vec::with_capacity(packed_len);
    for _ in 0..packed_len {
        out.push(decode_symbol(&mut bits, &dec)?);
    }
    if bits.bit_pos.div_ceil(8) != stream.len() {
        return None;
    }
    // Padding bits in the last byte must be zero.
    let used = bits.bit_pos % 8;
    if used != 0 && stream[stream.len() - 1] & (0xFF >> used) != 0 {
        return None;
    }
    Some(out)
}
