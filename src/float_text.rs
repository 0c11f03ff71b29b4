//! Fixed two-decimal text for `v`.

use std::fmt::{self, Write};

use crate::error::EncodeError;

/// Reject NaN and infinities before they reach the formatter
#[inline]
pub(crate) fn check_finite(v: f64, row: usize) -> Result<(), EncodeError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(EncodeError::NonFiniteValue { row, value: v })
    }
}

/// Write `v` with exactly two fractional digits and a `.` radix point.
///
/// Goes through `core::fmt`, which renders into `out` directly and never
/// allocates. Output does not depend on locale.
#[inline]
pub(crate) fn write_fixed2<W: Write>(out: &mut W, v: f64) -> fmt::Result {
    write!(out, "{v:.2}")
}
