//! Per-row carry-forward encoding.

use crate::constants::{FALSE_TEXT, LINE_TERMINATOR, SEPARATOR, TRUE_TEXT};
use crate::error::EncodeError;
use crate::float_text::{check_finite, write_fixed2};
use crate::int_text::text_of;
use crate::record::Record;
use crate::scratch::ScratchLineBuffer;

/// How rows after the first are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Omit cells whose value equals the previous record's
    #[default]
    CarryForward,
    /// Write every cell of every row
    Full,
}

/// Encodes rows one at a time, carrying the previous record between calls.
///
/// Starts from [`Record::SENTINEL`]. The first row is always written in full;
/// later rows follow the [`Mode`]. One instance per stream, never shared.
#[derive(Debug, Clone)]
pub struct RowEncoder {
    previous: Record,
    rows: usize,
    mode: Mode,
}

impl RowEncoder {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            previous: Record::SENTINEL,
            rows: 0,
            mode,
        }
    }

    /// Append the row for `current` to `out` and make it the new previous record
    ///
    /// # Errors
    /// Returns [`EncodeError::NonFiniteValue`] if `current.v` is NaN or infinite.
    /// Nothing is written and the previous record is left unchanged.
    #[inline]
    pub fn encode(&mut self, current: &Record, out: &mut ScratchLineBuffer) -> Result<(), EncodeError> {
        let written = if self.rows == 0 || self.mode == Mode::Full {
            write_full_row(current, out)
        } else {
            write_delta_row(current, &self.previous, out)
        };
        // The row functions know nothing of stream position
        let row = self.rows;
        written.map_err(|e| match e {
            EncodeError::NonFiniteValue { value, .. } => EncodeError::NonFiniteValue { row, value },
            other => other,
        })?;
        self.previous = *current;
        self.rows += 1;
        Ok(())
    }

    /// The last encoded record, or the sentinel before the first row
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &Record {
        &self.previous
    }

    /// Number of rows encoded so far
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for RowEncoder {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

/// Append the delta row of `current` against `previous`.
///
/// A cell's text is written only when its field differs from `previous`
/// (bit-exact for `v`); the six separators and the terminator are always written.
///
/// # Errors
/// Returns [`EncodeError::NonFiniteValue`] (with `row` 0) if `current.v` is NaN
/// or infinite. Nothing is written to `out` in that case.
#[inline]
pub fn write_delta_row(
    current: &Record,
    previous: &Record,
    out: &mut ScratchLineBuffer,
) -> Result<(), EncodeError> {
    check_finite(current.v, 0)?;
    write_row(current, Some(previous), out);
    Ok(())
}

/// Append `current` with every cell populated.
///
/// # Errors
/// Returns [`EncodeError::NonFiniteValue`] (with `row` 0) if `current.v` is NaN
/// or infinite. Nothing is written to `out` in that case.
#[inline]
pub fn write_full_row(current: &Record, out: &mut ScratchLineBuffer) -> Result<(), EncodeError> {
    check_finite(current.v, 0)?;
    write_row(current, None, out);
    Ok(())
}

#[inline]
fn write_row(current: &Record, previous: Option<&Record>, out: &mut ScratchLineBuffer) {
    let prev = previous.unwrap_or(&Record::SENTINEL);
    let full = previous.is_none();

    push_u16(out, current.p, full || current.p != prev.p);
    push_u16(out, current.l, full || current.l != prev.l);
    push_u16(out, current.t, full || current.t != prev.t);
    push_u16(out, current.m, full || current.m != prev.m);
    push_bool(out, current.elapsed, full || current.elapsed != prev.elapsed);
    push_bool(out, current.changed, full || current.changed != prev.changed);

    if full || !current.same_v(prev) {
        // ScratchLineBuffer accepts every write
        let _ = write_fixed2(out, current.v);
    }
    out.push_byte(LINE_TERMINATOR);
}

#[inline]
fn push_u16(out: &mut ScratchLineBuffer, value: u16, emit: bool) {
    if emit {
        out.push_str(text_of(value));
    }
    out.push_byte(SEPARATOR);
}

#[inline]
fn push_bool(out: &mut ScratchLineBuffer, value: bool, emit: bool) {
    if emit {
        out.push_byte(if value { TRUE_TEXT } else { FALSE_TEXT });
    }
    out.push_byte(SEPARATOR);
}
