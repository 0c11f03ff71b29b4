//! Error types for carryrow encoding and decoding operations.

use std::io;

use thiserror::Error;

use crate::record::Column;

/// Error returned when encoding a record stream fails
#[derive(Debug, Error)]
pub enum EncodeError {
    /// `v` is NaN or infinite (zero-based record index)
    #[error("record {row}: v must be finite, got {value}")]
    NonFiniteValue { row: usize, value: f64 },
    /// The destination writer failed
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),
}

/// Error returned when decoding fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input is empty or ends before the header terminator
    #[error("missing header row")]
    MissingHeader,
    /// First line is not the expected header
    #[error("unexpected header {found:?}")]
    BadHeader { found: String },
    /// Row does not have exactly seven cells (1-based line number)
    #[error("line {line}: expected 7 cells, found {found}")]
    ColumnCount { line: usize, found: usize },
    /// Cell text does not parse for its column
    #[error("line {line}: invalid {} cell {text:?}", .column.name())]
    InvalidCell {
        line: usize,
        column: Column,
        text: String,
    },
    /// Last row is not terminated by a line feed
    #[error("line {line}: row is missing its line terminator")]
    MissingTerminator { line: usize },
    /// Decoded `v` is not finite
    #[error("line {line}: v must be finite")]
    NonFiniteValue { line: usize },
}
