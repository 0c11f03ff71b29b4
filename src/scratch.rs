//! Reusable line buffer for assembling one row.

use std::fmt;

use smallvec::SmallVec;

use crate::constants::{cold_spill_handler, SCRATCH_CAPACITY};

/// Small inline byte buffer that holds a single row while it is being built.
///
/// Up to [`SCRATCH_CAPACITY`] bytes live inline. Longer rows (only possible with
/// a very wide `v`) move to a heap allocation instead of truncating. The buffer
/// keeps the larger capacity after [`reset`](Self::reset), so a stream pays for
/// the spill at most once.
#[derive(Debug, Clone, Default)]
pub struct ScratchLineBuffer {
    bytes: SmallVec<[u8; SCRATCH_CAPACITY]>,
    spill_count: u32,
}

impl ScratchLineBuffer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear contents without releasing storage
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Append a single ASCII byte
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        debug_assert!(byte.is_ascii());
        let was_inline = !self.bytes.spilled();
        self.bytes.push(byte);
        self.note_spill(was_inline);
    }

    /// Append text
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        let was_inline = !self.bytes.spilled();
        self.bytes.extend_from_slice(s.as_bytes());
        self.note_spill(was_inline);
    }

    /// Current contents
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the contents have moved to the heap
    #[inline]
    #[must_use]
    pub fn spilled(&self) -> bool {
        self.bytes.spilled()
    }

    /// How many times this buffer has moved from inline to heap storage
    #[inline]
    #[must_use]
    pub fn spill_count(&self) -> u32 {
        self.spill_count
    }

    #[inline]
    fn note_spill(&mut self, was_inline: bool) {
        if was_inline && self.bytes.spilled() {
            cold_spill_handler();
            self.spill_count = self.spill_count.saturating_add(1);
            log::trace!("scratch line buffer spilled to heap at {} bytes", self.bytes.len());
        }
    }
}

impl fmt::Write for ScratchLineBuffer {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
