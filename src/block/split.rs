//! Splitting a source buffer into fixed-size blocks.

/// One block-sized span of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan<'a> {
    /// Position of the block in the frame, from 0.
    pub index: usize,
    /// Byte offset of the block in the source.
    pub offset: usize,
    pub data: &'a [u8],
}

/// Iterator over the blocks of a source buffer. See [`split_blocks`].
#[derive(Debug, Clone)]
pub struct BlockSpans<'a> {
    src: &'a [u8],
    block_size: usize,
    offset: usize,
    index: usize,
}

impl<'a> Iterator for BlockSpans<'a> {
    type Item = BlockSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.src.len() {
            return None;
        }
        let end = self.src.len().min(self.offset + self.block_size);
        let span =
            BlockSpan { index: self.index, offset: self.offset, data: &self.src[self.offset..end] };
        self.offset = end;
        self.index += 1;
        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = block_count(self.src.len() - self.offset, self.block_size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for BlockSpans<'_> {}

/// Split `src` into `ceil(src.len() / block_size)` contiguous spans, in order.
///
/// Every span is `block_size` bytes long except possibly the last, which is
/// never empty. An empty `src` yields nothing. `block_size` must be non-zero.
pub fn split_blocks(src: &[u8], block_size: usize) -> BlockSpans<'_> {
    assert!(block_size > 0, "block_size must be non-zero");
    BlockSpans { src, block_size, offset: 0, index: 0 }
}

/// Number of blocks a source of `len` bytes splits into.
#[inline]
pub const fn block_count(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size)
}
