#![no_main]

use carryrow::{decode, HEADER};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the decoder
    let _ = decode(data);

    // Same body behind a valid header, so row parsing is reached
    let mut input = HEADER.as_bytes().to_vec();
    input.extend_from_slice(data);
    let _ = decode(&input);
});
