//! Decimal text for unsigned integers.
//!
//! Two strategies:
//! - [`IntegerTextCache`]: every `u16` rendered once up front, lookups are a
//!   pair of array reads. About 380 KiB of process-wide memory.
//! - [`format_digit_pairs`]: the 100-entry digit pair table consumed two digits
//!   at a time from the least-significant end, for domains too large to
//!   precompute (any `u64`).

use once_cell::sync::Lazy;

use crate::constants::{DIGIT_PAIRS, MAX_U64_DIGITS};

/// Number of values in the `u16` domain
const DOMAIN: usize = u16::MAX as usize + 1;

/// Precomputed decimal text for every `u16`.
///
/// All texts are packed into a single byte arena. `offsets[v]..offsets[v + 1]`
/// is the text of `v`, so the table costs two allocations in total.
pub struct IntegerTextCache {
    text: Box<str>,
    offsets: Box<[u32]>,
}

static GLOBAL: Lazy<IntegerTextCache> = Lazy::new(IntegerTextCache::build);

impl IntegerTextCache {
    /// Build the table for 0..=65535
    #[must_use]
    pub fn build() -> Self {
        // 10 one-digit + 90 two-digit + 900 three-digit + 9000 four-digit + 55536 five-digit
        let total = 10 + 90 * 2 + 900 * 3 + 9000 * 4 + (DOMAIN - 10_000) * 5;
        let mut text = String::with_capacity(total);
        let mut offsets = Vec::with_capacity(DOMAIN + 1);
        let mut buf = DigitBuf::new();

        offsets.push(0u32);
        for value in 0..=u16::MAX {
            text.push_str(format_digit_pairs(u64::from(value), &mut buf));
            offsets.push(text.len() as u32);
        }
        debug_assert_eq!(text.len(), total);

        log::debug!("built integer text cache: {} values, {} bytes", DOMAIN, text.len());

        Self {
            text: text.into_boxed_str(),
            offsets: offsets.into_boxed_slice(),
        }
    }

    /// Process-wide instance, built on first use
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Build the process-wide instance now instead of on the first lookup
    pub fn warm_up() {
        Lazy::force(&GLOBAL);
    }

    /// Whether the process-wide instance has been built
    #[must_use]
    pub fn is_built() -> bool {
        Lazy::get(&GLOBAL).is_some()
    }

    /// Decimal text of `value`
    #[inline]
    #[must_use]
    pub fn text_of(&self, value: u16) -> &str {
        let i = usize::from(value);
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.text[start..end]
    }
}

/// Decimal text of `value` from the process-wide cache
#[inline]
#[must_use]
pub fn text_of(value: u16) -> &'static str {
    IntegerTextCache::global().text_of(value)
}

/// Number of decimal digits in `v`, stepping four orders of magnitude at a time
#[inline]
#[must_use]
pub fn digits10(mut v: u64) -> usize {
    let mut result = 1;
    loop {
        if v < 10 {
            return result;
        }
        if v < 100 {
            return result + 1;
        }
        if v < 1_000 {
            return result + 2;
        }
        if v < 10_000 {
            return result + 3;
        }
        v /= 10_000;
        result += 4;
    }
}

/// Caller-supplied output buffer for [`format_digit_pairs`]
#[derive(Debug, Clone, Copy)]
pub struct DigitBuf {
    bytes: [u8; MAX_U64_DIGITS],
}

impl DigitBuf {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [b'0'; MAX_U64_DIGITS],
        }
    }
}

impl Default for DigitBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `value` into `buf` and return the written digits.
///
/// Digits are written right to left, two per iteration via [`DIGIT_PAIRS`].
#[inline]
pub fn format_digit_pairs(mut value: u64, buf: &mut DigitBuf) -> &str {
    let len = digits10(value);
    let out = &mut buf.bytes[..len];
    let mut next = len;

    while value >= 100 {
        let i = ((value % 100) * 2) as usize;
        value /= 100;
        out[next - 1] = DIGIT_PAIRS[i + 1];
        out[next - 2] = DIGIT_PAIRS[i];
        next -= 2;
    }

    // Last 1-2 digits
    if value < 10 {
        out[next - 1] = b'0' | value as u8;
    } else {
        let i = (value * 2) as usize;
        out[next - 1] = DIGIT_PAIRS[i + 1];
        out[next - 2] = DIGIT_PAIRS[i];
    }

    // Only ASCII digits were written
    match std::str::from_utf8(out) {
        Ok(s) => s,
        Err(_) => unreachable!("digit buffer holds ASCII digits only"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_pair_table_is_consistent() {
        for n in 0..100usize {
            let expected = format!("{n:02}");
            assert_eq!(&DIGIT_PAIRS[2 * n..2 * n + 2], expected.as_bytes());
        }
    }

    #[test]
    fn digits10_boundaries() {
        assert_eq!(digits10(0), 1);
        assert_eq!(digits10(9), 1);
        assert_eq!(digits10(10), 2);
        assert_eq!(digits10(9_999), 4);
        assert_eq!(digits10(10_000), 5);
        assert_eq!(digits10(65_535), 5);
        assert_eq!(digits10(99_999_999), 8);
        assert_eq!(digits10(100_000_000), 9);
        assert_eq!(digits10(u64::MAX), 20);
    }
}
