//! Stream encoder for carryrow text output.

use std::borrow::Borrow;
use std::io;

use crate::constants::HEADER;
use crate::error::EncodeError;
use crate::int_text::IntegerTextCache;
use crate::pool::BufferPool;
use crate::record::Record;
use crate::row::{Mode, RowEncoder};
use crate::scratch::ScratchLineBuffer;

/// Encoder for carryrow streams
///
/// Writes the header, then one row per record, each row assembled in a reusable
/// scratch buffer and flushed to the destination. The previous-record state is
/// created fresh for every call, so one `StreamEncoder` can encode many
/// independent streams in turn. It is not meant to be shared between threads;
/// give each thread its own encoder (they may share a pool).
#[derive(Debug)]
pub struct StreamEncoder<'p> {
    pool: &'p BufferPool,
    scratch: ScratchLineBuffer,
    mode: Mode,
}

impl StreamEncoder<'static> {
    /// Create an encoder backed by the process-wide pool
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool(BufferPool::global())
    }
}

impl Default for StreamEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> StreamEncoder<'p> {
    /// Create an encoder that takes its output buffers from `pool`
    #[inline]
    #[must_use]
    pub fn with_pool(pool: &'p BufferPool) -> Self {
        // Keep table construction out of the first encode pass
        IntegerTextCache::warm_up();
        Self {
            pool,
            scratch: ScratchLineBuffer::new(),
            mode: Mode::CarryForward,
        }
    }

    /// Select carry-forward (default) or full rows
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Times the scratch buffer has spilled to the heap over this encoder's life
    #[inline]
    #[must_use]
    pub fn scratch_spills(&self) -> u32 {
        self.scratch.spill_count()
    }

    /// Encode `records` and return the complete output.
    ///
    /// The output buffer comes from the pool and goes back to it before this
    /// returns, on success and on error alike. An empty input yields only the
    /// header row.
    ///
    /// The result is a copy of the pooled buffer, so a pass briefly holds the
    /// output twice. For large outputs, pass a sink from
    /// [`BufferPool::acquire`] to [`encode_to`](Self::encode_to) and take it with
    /// [`PooledSink::into_bytes`](crate::PooledSink::into_bytes) instead.
    ///
    /// # Errors
    /// Returns [`EncodeError::NonFiniteValue`] if any record has a NaN or
    /// infinite `v`.
    pub fn encode<I>(&mut self, records: I) -> Result<Vec<u8>, EncodeError>
    where
        I: IntoIterator,
        I::Item: Borrow<Record>,
    {
        let pool = self.pool;
        let mut sink = pool.acquire();
        self.encode_to(records, &mut sink)?;
        Ok(sink.to_bytes())
    }

    /// Encode `records` straight into `writer`, returning the number of rows.
    ///
    /// # Errors
    /// Returns [`EncodeError::NonFiniteValue`] on a NaN or infinite `v`, and
    /// [`EncodeError::Io`] when `writer` fails. Rows before the failing one have
    /// already been written.
    pub fn encode_to<I, W>(&mut self, records: I, writer: &mut W) -> Result<usize, EncodeError>
    where
        I: IntoIterator,
        I::Item: Borrow<Record>,
        W: io::Write + ?Sized,
    {
        writer.write_all(HEADER.as_bytes())?;

        let mut rows = RowEncoder::new(self.mode);
        let mut bytes = HEADER.len();
        for record in records {
            self.scratch.reset();
            rows.encode(record.borrow(), &mut self.scratch)?;
            writer.write_all(self.scratch.as_bytes())?;
            bytes += self.scratch.len();
        }

        log::debug!(
            "encoded {} rows into {} bytes ({:?})",
            rows.rows(),
            bytes,
            self.mode
        );
        Ok(rows.rows())
    }
}

/// Encode `records` with a carry-forward encoder on the process-wide pool
///
/// # Errors
/// Returns [`EncodeError::NonFiniteValue`] if any record has a NaN or infinite `v`.
pub fn encode<I>(records: I) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    StreamEncoder::new().encode(records)
}
