//! Record struct and column schema.

use serde::{Deserialize, Serialize};

/// One telemetry record in the fixed `p,l,t,m,elapsed,changed,v` schema
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub p: u16,
    pub l: u16,
    pub t: u16,
    pub m: u16,
    pub elapsed: bool,
    pub changed: bool,
    /// Must be finite; rendered with exactly two fractional digits
    pub v: f64,
}

impl Record {
    /// All-zero/false record that every encoding and decoding pass starts from.
    ///
    /// The encoder always writes the first row in full, so the sentinel only
    /// becomes visible to a decoder fed a first row with empty cells.
    pub const SENTINEL: Self = Self {
        p: 0,
        l: 0,
        t: 0,
        m: 0,
        elapsed: false,
        changed: false,
        v: 0.0,
    };

    /// Bit-exact equality of `v`, as used by change detection
    #[inline]
    #[must_use]
    pub fn same_v(&self, other: &Self) -> bool {
        self.v.to_bits() == other.v.to_bits()
    }

    /// Field-wise equality under the change-detection rule (bit-exact for `v`)
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.p == other.p
            && self.l == other.l
            && self.t == other.t
            && self.m == other.m
            && self.elapsed == other.elapsed
            && self.changed == other.changed
            && self.same_v(other)
    }
}

/// Columns of a row, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    P,
    L,
    T,
    M,
    Elapsed,
    Changed,
    V,
}

impl Column {
    /// All columns in emission order
    pub const ALL: [Self; 7] = [
        Self::P,
        Self::L,
        Self::T,
        Self::M,
        Self::Elapsed,
        Self::Changed,
        Self::V,
    ];

    /// Header name of the column
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::L => "l",
            Self::T => "t",
            Self::M => "m",
            Self::Elapsed => "elapsed",
            Self::Changed => "changed",
            Self::V => "v",
        }
    }

    /// Zero-based position within a row
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
