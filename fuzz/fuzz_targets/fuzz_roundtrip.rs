#![no_main]

use carryrow::{decode, Mode, Record, StreamEncoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Each 13-byte chunk is one record: 4 x u16, flags byte, i32 hundredths of v
    let records: Vec<Record> = data
        .chunks_exact(13)
        .map(|c| Record {
            p: u16::from_le_bytes([c[0], c[1]]),
            l: u16::from_le_bytes([c[2], c[3]]),
            t: u16::from_le_bytes([c[4], c[5]]),
            m: u16::from_le_bytes([c[6], c[7]]),
            elapsed: c[8] & 1 != 0,
            changed: c[8] & 2 != 0,
            v: f64::from(i32::from_le_bytes([c[9], c[10], c[11], c[12]])) / 100.0,
        })
        .collect();

    let delta = StreamEncoder::new().encode(&records).unwrap();
    let full = StreamEncoder::new().with_mode(Mode::Full).encode(&records).unwrap();

    // Property 1: carry-forward decoding restores the input
    assert_eq!(decode(&delta).unwrap(), records, "delta round trip");

    // Property 2: full rows decode to the same records
    assert_eq!(decode(&full).unwrap(), records, "full round trip");

    // Property 3: suppression never makes output larger
    assert!(delta.len() <= full.len(), "delta larger than full");

    // Property 4: every row has six separators
    let text = std::str::from_utf8(&delta).unwrap();
    for row in text.lines() {
        assert_eq!(row.matches(',').count(), 6, "separator count");
    }
});
