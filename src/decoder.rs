//! Decoding carryrow text back into records.

use crate::constants::{FALSE_TEXT, HEADER, LINE_TERMINATOR, SEPARATOR, TRUE_TEXT};
use crate::error::DecodeError;
use crate::record::{Column, Record};

/// Decode a complete carryrow stream
///
/// Empty cells take the last value seen in that column, starting from
/// [`Record::SENTINEL`].
///
/// # Returns
/// * `Ok(Vec<Record>)` - one record per data row; empty if only the header is present
/// * `Err(DecodeError)` - header missing or wrong, malformed row, or unterminated last row
///
/// # Example
/// ```
/// use carryrow::{decode, encode, Record};
///
/// let a = Record { p: 1, l: 2, t: 3, m: 4, elapsed: true, changed: false, v: 1.5 };
/// let b = Record { m: 5, ..a };
/// let bytes = encode([a, b]).unwrap();
/// assert_eq!(decode(&bytes).unwrap(), vec![a, b]);
/// ```
#[must_use = "decoding returns records that should be used"]
pub fn decode(buf: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let Some(header_end) = buf.iter().position(|&b| b == LINE_TERMINATOR) else {
        return Err(DecodeError::MissingHeader);
    };
    let header = &buf[..=header_end];
    if header != HEADER.as_bytes() {
        return Err(DecodeError::BadHeader {
            found: String::from_utf8_lossy(&header[..header_end]).into_owned(),
        });
    }

    let mut decoder = RowDecoder::new();
    let mut result = Vec::new();
    let mut rest = &buf[header_end + 1..];

    while !rest.is_empty() {
        let line = decoder.line();
        let Some(end) = rest.iter().position(|&b| b == LINE_TERMINATOR) else {
            return Err(DecodeError::MissingTerminator { line });
        };
        result.push(decoder.decode_row(&rest[..end])?);
        rest = &rest[end + 1..];
    }

    Ok(result)
}

/// Incremental decoder for data rows, carrying the last value per column
#[derive(Debug, Clone)]
pub struct RowDecoder {
    previous: Record,
    /// 1-based line number of the next row; the header is line 1
    line: usize,
}

impl RowDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous: Record::SENTINEL,
            line: 2,
        }
    }

    /// Line number the next row is reported under
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Decode one data row, without its line terminator
    ///
    /// # Errors
    /// Returns an error if the row does not have seven cells or a cell does not
    /// parse for its column. The carried state is unchanged on error.
    pub fn decode_row(&mut self, row: &[u8]) -> Result<Record, DecodeError> {
        let line = self.line;
        let empty: &[u8] = &[];
        let mut cells = [empty; Column::ALL.len()];
        let mut found = 0;
        for cell in row.split(|&b| b == SEPARATOR) {
            if found < cells.len() {
                cells[found] = cell;
            }
            found += 1;
        }
        if found != cells.len() {
            return Err(DecodeError::ColumnCount { line, found });
        }

        let prev = &self.previous;
        let record = Record {
            p: int_cell(cells[Column::P.index()], prev.p, line, Column::P)?,
            l: int_cell(cells[Column::L.index()], prev.l, line, Column::L)?,
            t: int_cell(cells[Column::T.index()], prev.t, line, Column::T)?,
            m: int_cell(cells[Column::M.index()], prev.m, line, Column::M)?,
            elapsed: bool_cell(cells[Column::Elapsed.index()], prev.elapsed, line, Column::Elapsed)?,
            changed: bool_cell(cells[Column::Changed.index()], prev.changed, line, Column::Changed)?,
            v: float_cell(cells[Column::V.index()], prev.v, line)?,
        };

        self.previous = record;
        self.line += 1;
        Ok(record)
    }
}

impl Default for RowDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(cell: &[u8], line: usize, column: Column) -> DecodeError {
    DecodeError::InvalidCell {
        line,
        column,
        text: String::from_utf8_lossy(cell).into_owned(),
    }
}

#[inline]
fn int_cell(cell: &[u8], carried: u16, line: usize, column: Column) -> Result<u16, DecodeError> {
    if cell.is_empty() {
        return Ok(carried);
    }
    let mut value: u16 = 0;
    for &b in cell {
        if !b.is_ascii_digit() {
            return Err(invalid(cell, line, column));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u16::from(b - b'0')))
            .ok_or_else(|| invalid(cell, line, column))?;
    }
    Ok(value)
}

#[inline]
fn bool_cell(cell: &[u8], carried: bool, line: usize, column: Column) -> Result<bool, DecodeError> {
    match cell {
        [] => Ok(carried),
        [TRUE_TEXT] => Ok(true),
        [FALSE_TEXT] => Ok(false),
        _ => Err(invalid(cell, line, column)),
    }
}

#[inline]
fn float_cell(cell: &[u8], carried: f64, line: usize) -> Result<f64, DecodeError> {
    if cell.is_empty() {
        return Ok(carried);
    }
    let v: f64 = std::str::from_utf8(cell)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid(cell, line, Column::V))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DecodeError::NonFiniteValue { line })
    }
}
