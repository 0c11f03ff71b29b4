//! Internal constants and helper tables for carryrow encoding.

/// Cell separator
pub(crate) const SEPARATOR: u8 = b',';

/// Row terminator (LF only, no carriage return)
pub(crate) const LINE_TERMINATOR: u8 = b'\n';

/// Header row, including its terminator
pub const HEADER: &str = "p,l,t,m,elapsed,changed,v\n";

/// Inline capacity of the scratch line buffer.
///
/// Worst common case: 4 x 5 digits + 2 booleans + ~10 chars of `v` + 6 separators
/// + terminator fits comfortably. Wider `v` values spill to the heap.
pub const SCRATCH_CAPACITY: usize = 40;

/// Text emitted for a `true` boolean cell
pub(crate) const TRUE_TEXT: u8 = b'1';

/// Text emitted for a `false` boolean cell
pub(crate) const FALSE_TEXT: u8 = b'0';

/// Two ASCII digits for every value 0..100, laid out pairwise.
///
/// `DIGIT_PAIRS[2 * n]` is the tens digit of `n`, `DIGIT_PAIRS[2 * n + 1]` the ones digit.
pub(crate) const DIGIT_PAIRS: [u8; 200] = *b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

/// Maximum decimal digits of a `u64`
pub(crate) const MAX_U64_DIGITS: usize = 20;

// Branch hints using #[cold] attribute (stable Rust)
#[cold]
#[inline(never)]
pub(crate) fn cold_spill_handler() {}
