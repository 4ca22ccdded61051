//! Bulk string body reader with bounded buffer growth.
//!
//! The length of a bulk reply comes from the peer, so the body buffer is
//! never allocated in one go for large replies: it starts at
//! [`INITIAL_BUFFER_SIZE`] and grows by at most [`MAX_GROWTH_STEP`] per
//! read, each step exact-filling the newly added tail. A corrupted or hostile
//! length therefore costs at most one step of memory beyond what the peer
//! actually sent before the read fails.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

/// Bodies up to this size are read with a single exact read.
pub const INITIAL_BUFFER_SIZE: usize = 4096;

/// Upper bound on buffer growth per read step (1 MiB).
pub const MAX_GROWTH_STEP: usize = 1024 * 1024;

/// Read exactly `len` bytes of bulk body.
///
/// A short read surfaces as `UnexpectedEof`.
pub async fn read_bulk<R>(reader: &mut R, len: usize) -> std::io::Result<BytesMut>
where
    R: AsyncRead + Unpin,
{
    read_bulk_with_step(reader, len, MAX_GROWTH_STEP).await
}

/// [`read_bulk`] with a custom growth step.
pub async fn read_bulk_with_step<R>(
    reader: &mut R,
    len: usize,
    step: usize,
) -> std::io::Result<BytesMut>
where
    R: AsyncRead + Unpin,
{
    if len <= INITIAL_BUFFER_SIZE {
        let mut buf = BytesMut::zeroed(len);
        reader.read_exact(&mut buf).await?;
        return Ok(buf);
    }

    let step = step.max(1);
    let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_SIZE);
    let mut steps = 0usize;

    while buf.len() < len {
        let filled = buf.len();
        let grow = (len - filled).min(step);
        buf.resize(filled + grow, 0);
        reader.read_exact(&mut buf[filled..]).await?;
        steps += 1;
    }

    trace!(len, steps, "Bulk body read in chunks");
    Ok(buf)
}
