//! `carryrow` - Carry-forward delta encoding for fixed-schema telemetry rows
//!
//! Serializes a stream of records with the fixed schema `p,l,t,m,elapsed,changed,v`
//! into compact comma-separated text. Any cell whose value is unchanged from the
//! previous record is left empty, which shrinks slow-changing streams a lot while
//! staying trivially readable.
//!
//! # Features
//! - **No per-row allocation**: rows are built in a 40-byte inline scratch buffer,
//!   integers come from a precomputed table, `v` is formatted in place
//! - **Pooled output buffers**: output sinks are borrowed from a lock-free pool
//!   and returned on every exit path
//! - **Streaming**: encode straight into any `std::io::Write`
//! - **Decoder included**: carry-forward substitution restores the records
//!
//! # Example
//! ```
//! use carryrow::{decode, Record, StreamEncoder};
//!
//! let records = [
//!     Record { p: 1, l: 2, t: 3, m: 4, elapsed: true, changed: false, v: 1.5 },
//!     Record { p: 1, l: 2, t: 3, m: 5, elapsed: true, changed: false, v: 1.5 },
//! ];
//!
//! let mut encoder = StreamEncoder::new();
//! let bytes = encoder.encode(&records).unwrap();
//! assert_eq!(bytes, b"p,l,t,m,elapsed,changed,v\n1,2,3,4,1,0,1.50\n,,,5,,,\n");
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded, records);
//! ```
//!
//! # Text Format
//!
//! ## Header
//!
//! `p,l,t,m,elapsed,changed,v\n`, ASCII, LF only.
//!
//! ## Rows
//!
//! | Column | Type | Text when changed |
//! |--------|------|-------------------|
//! | `p`, `l`, `t`, `m` | `u16` | decimal, no leading zeros |
//! | `elapsed`, `changed` | `bool` | `1` or `0` |
//! | `v` | finite `f64` | two fractional digits, `.` radix point |
//!
//! A cell is empty exactly when the field equals the previous record's (bit-exact
//! for `v`). The six separators are written on every row; `v` is followed only by
//! `\n`. The first row is always written in full.
//!
//! To decode, remember the last non-empty value of each column and substitute it
//! for empty cells.
//!
//! # Internal Implementation
//!
//! ## Integer Text
//!
//! Every `u16` is rendered once into a shared arena ([`IntegerTextCache`]), so
//! emitting an integer cell is a slice copy. [`format_digit_pairs`] is the
//! table-free fallback for wider integers: it consumes two decimal digits per step
//! through a 100-entry pair table.
//!
//! ## Scratch Buffer
//!
//! [`ScratchLineBuffer`] keeps up to 40 bytes inline. Pathologically wide `v`
//! values (e.g. `f64::MAX` renders to 312 characters) spill to the heap instead of
//! being truncated.
//!
//! ## Concurrency
//!
//! Rows within one stream depend on their predecessor, so a stream is encoded
//! sequentially. Independent streams can be encoded on separate threads, each
//! with its own [`StreamEncoder`]; only the [`BufferPool`] is shared.

#![allow(clippy::cast_possible_truncation)]

mod constants;
mod decoder;
mod encoder;
mod error;
mod float_text;
mod int_text;
mod pool;
mod record;
mod row;
mod scratch;

#[cfg(test)]
mod tests;

// Re-export public API
pub use constants::{HEADER, SCRATCH_CAPACITY};
pub use decoder::{decode, RowDecoder};
pub use encoder::{encode, StreamEncoder};
pub use error::{DecodeError, EncodeError};
pub use int_text::{digits10, format_digit_pairs, text_of, DigitBuf, IntegerTextCache};
pub use pool::{BufferPool, PoolConfig, PoolMetrics, PooledSink};
pub use record::{Column, Record};
pub use row::{write_delta_row, write_full_row, Mode, RowEncoder};
pub use scratch::ScratchLineBuffer;
