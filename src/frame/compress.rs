//! One-shot frame compression.
//!
//! [`compress`] validates the parameters, writes the header, then encodes
//! the blocks in order:
//!
//! - **Sequential** (`workers == 1`, or a single block): one [`BlockEncoder`]
//!   writes every block straight into `dst`.
//! - **Parallel**: blocks are encoded on a [`WorkerPool`] into per-block
//!   scratch buffers, each worker reusing its own encoder; the buffers are
//!   then copied into `dst` in block order.
//!
//! Both paths produce byte-identical frames. The content digest, if any, is
//! appended last.

use log::debug;
use rayon::prelude::*;

use crate::block::compress::{block_bound, BlockEncoder};
use crate::block::split::{block_count, split_blocks, BlockSpan};
use crate::block::types::LevelParams;
use crate::checksum::{digest, write_digest};
use crate::error::{ensure_capacity, Error, Result};
use crate::frame::header::{frame_bound, write_header};
use crate::frame::types::{FrameInfo, Params};
use crate::threadpool::WorkerPool;

/// Shift a capacity error reported for `dst[offset..]` so that it describes
/// the whole destination buffer.
fn at_offset(err: Error, offset: usize) -> Error {
    match err {
        Error::DstTooSmall { needed, available } => {
            Error::DstTooSmall { needed: needed + offset, available: available + offset }
        }
        other => other,
    }
}

/// Compress `src` into a complete frame in `dst`.
///
/// Returns the number of bytes written, which never exceeds
/// [`compress_bound`](crate::frame::header::compress_bound)`(src.len(), params.block_size)`.
///
/// # Errors
///
/// * Any `Config` error from [`Params::validate`], before anything is written.
/// * [`Error::SrcSizeTooLarge`] if the frame size is not representable.
/// * [`Error::DstTooSmall`] if `dst` cannot hold the frame. Nothing is
///   written past `dst.len()`.
pub fn compress(src: &[u8], dst: &mut [u8], params: &Params) -> Result<usize> {
    let level = params.validate()?;
    frame_bound(src.len(), params)?;

    let info = FrameInfo {
        level: params.level,
        block_size: params.block_size,
        checksum: params.checksum,
        content_size: src.len() as u64,
    };
    let mut pos = write_header(&info, dst)?;

    let nb_blocks = block_count(src.len(), params.block_size);
    let spans = split_blocks(src, params.block_size);
    pos = match WorkerPool::for_jobs(params.workers, nb_blocks) {
        Some(pool) => {
            debug!(
                "compress: {} bytes, level {}, {} blocks on {} workers",
                src.len(),
                params.level,
                nb_blocks,
                pool.nb_workers()
            );
            compress_blocks_parallel(&pool, spans.collect(), &level, dst, pos)?
        }
        None => {
            debug!("compress: {} bytes, level {}, {} blocks", src.len(), params.level, nb_blocks);
            compress_blocks_sequential(spans, &level, dst, pos)?
        }
    };

    let trailer = params.checksum.digest_size();
    ensure_capacity(pos + trailer, dst.len())?;
    write_digest(params.checksum, digest(params.checksum, src), &mut dst[pos..]);
    pos += trailer;

    debug!("compress: frame is {} bytes", pos);
    Ok(pos)
}

fn compress_blocks_sequential<'a>(
    spans: impl Iterator<Item = BlockSpan<'a>>,
    level: &LevelParams,
    dst: &mut [u8],
    mut pos: usize,
) -> Result<usize> {
    let mut encoder = BlockEncoder::new();
    for span in spans {
        pos += encoder
            .compress_block(span.data, &mut dst[pos..], level)
            .map_err(|e| at_offset(e, pos))?;
    }
    Ok(pos)
}

fn compress_blocks_parallel(
    pool: &WorkerPool,
    spans: Vec<BlockSpan<'_>>,
    level: &LevelParams,
    dst: &mut [u8],
    mut pos: usize,
) -> Result<usize> {
    let encoded: Vec<Result<Vec<u8>>> = pool.install(|| {
        spans
            .par_iter()
            .map_init(BlockEncoder::new, |encoder, span| {
                let mut buf = vec![0u8; block_bound(span.data.len())];
                let n = encoder.compress_block(span.data, &mut buf, level)?;
                buf.truncate(n);
                Ok(buf)
            })
            .collect()
    });

    // Reassemble in block order.
    for block in encoded {
        let block = block?;
        ensure_capacity(pos + block.len(), dst.len())?;
        dst[pos..pos + block.len()].copy_from_slice(&block);
        pos += block.len();
    }
    Ok(pos)
}

/// Compress `src` into a newly allocated, exactly sized frame.
pub fn compress_to_vec(src: &[u8], params: &Params) -> Result<Vec<u8>> {
    let mut out = vec![0u8; frame_bound(src.len(), params)?];
    let n = compress(src, &mut out, params)?;
    out.truncate(n);
    Ok(out)
}
