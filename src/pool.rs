//! Pool of reusable byte sinks.
//!
//! A [`BufferPool`] hands out [`PooledSink`] guards. Each guard owns a `Vec<u8>`
//! taken from the pool (or freshly allocated when the pool is empty) and gives it
//! back when dropped, on every exit path. Acquire and release are lock-free
//! (`crossbeam` `ArrayQueue`) and never block: an empty pool allocates, a full
//! pool drops the returned buffer.

use std::io;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::ArrayQueue;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle buffers kept for reuse (0 disables pooling)
    pub max_pooled: usize,
    /// Capacity of a freshly allocated buffer, in bytes
    pub initial_capacity: usize,
    /// Buffers that grew beyond this many bytes are dropped on release
    pub max_retained_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_pooled: 64,
            initial_capacity: 64 * 1024,
            max_retained_capacity: 64 * 1024 * 1024,
        }
    }
}

/// Snapshot of pool counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolMetrics {
    /// Acquires served from an idle buffer
    pub hits: u64,
    /// Acquires that had to allocate
    pub misses: u64,
    /// Buffers put back for reuse
    pub returned: u64,
    /// Buffers dropped on release (pool full or buffer too large)
    pub discarded: u64,
}

/// Shared pool of byte buffers
#[derive(Debug)]
pub struct BufferPool {
    idle: ArrayQueue<Vec<u8>>,
    config: PoolConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    returned: AtomicU64,
    discarded: AtomicU64,
}

static GLOBAL: Lazy<BufferPool> = Lazy::new(|| BufferPool::new(PoolConfig::default()));

impl BufferPool {
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self {
            // ArrayQueue needs a non-zero capacity; max_pooled == 0 is handled in release
            idle: ArrayQueue::new(config.max_pooled.max(1)),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            returned: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Process-wide pool with the default configuration
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Take an empty sink. Never blocks.
    pub fn acquire(&self) -> PooledSink<'_> {
        let buf = match self.idle.pop() {
            Some(buf) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "buffer pool empty, allocating {} bytes",
                    self.config.initial_capacity
                );
                Vec::with_capacity(self.config.initial_capacity)
            }
        };
        debug_assert!(buf.is_empty());
        PooledSink { buf, pool: self }
    }

    /// Number of idle buffers currently held
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    #[must_use]
    pub fn metrics(&self) -> PoolMetrics {
        PoolMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }

    fn release(&self, mut buf: Vec<u8>) {
        // Detached sinks leave an unallocated Vec behind
        if buf.capacity() == 0 {
            return;
        }
        if self.config.max_pooled == 0 || buf.capacity() > self.config.max_retained_capacity {
            self.discard(buf.capacity());
            return;
        }
        buf.clear();
        match self.idle.push(buf) {
            Ok(()) => {
                self.returned.fetch_add(1, Ordering::Relaxed);
            }
            Err(buf) => self.discard(buf.capacity()),
        }
    }

    fn discard(&self, capacity: usize) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
        log::debug!("buffer pool dropping released buffer of {capacity} bytes");
    }
}

/// Growable byte sink borrowed from a [`BufferPool`].
///
/// Returned to its pool on drop unless detached with [`into_bytes`](Self::into_bytes).
#[derive(Debug)]
pub struct PooledSink<'a> {
    buf: Vec<u8>,
    pool: &'a BufferPool,
}

impl PooledSink<'_> {
    /// Append bytes
    #[inline]
    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Accumulated content
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Copy the accumulated content out. The sink keeps its buffer and still
    /// goes back to the pool on drop.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Take the underlying buffer without copying. The buffer leaves the pool
    /// for good; use this when the output outlives the encoding pass.
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        mem::take(&mut self.buf)
    }
}

impl io::Write for PooledSink<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for PooledSink<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.buf));
    }
}
