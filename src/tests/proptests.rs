use crate::{decode, encode, text_of, Mode, Record, StreamEncoder};
use proptest::prelude::*;

prop_compose! {
    /// Arbitrary record whose `v` is a whole number of hundredths, so its
    /// two-decimal text parses back to the same double
    fn arb_record()(
        p in any::<u16>(),
        l in any::<u16>(),
        t in any::<u16>(),
        m in any::<u16>(),
        elapsed in any::<bool>(),
        changed in any::<bool>(),
        cents in -10_000_000i64..10_000_000,
    ) -> Record {
        Record { p, l, t, m, elapsed, changed, v: cents as f64 / 100.0 }
    }
}

prop_compose! {
    /// Slow-changing stream: each record copies the previous one and perturbs
    /// a random subset of fields, so suppression is exercised heavily
    fn arb_slow_stream()(
        first in arb_record(),
        steps in prop::collection::vec((any::<u8>(), arb_record()), 0..200),
    ) -> Vec<Record> {
        let mut out = vec![first];
        let mut cur = first;
        for (mask, fresh) in steps {
            if mask & 0x01 != 0 { cur.p = fresh.p; }
            if mask & 0x02 != 0 { cur.l = fresh.l; }
            if mask & 0x04 != 0 { cur.t = fresh.t; }
            if mask & 0x08 != 0 { cur.m = fresh.m; }
            if mask & 0x10 != 0 { cur.elapsed = fresh.elapsed; }
            if mask & 0x20 != 0 { cur.changed = fresh.changed; }
            if mask & 0x40 != 0 { cur.v = fresh.v; }
            out.push(cur);
        }
        out
    }
}

/// Cells of every data row, header stripped
fn cells(bytes: &[u8]) -> Vec<Vec<String>> {
    let s = std::str::from_utf8(bytes).unwrap();
    s.lines()
        .skip(1)
        .map(|line| line.split(',').map(str::to_owned).collect())
        .collect()
}

fn field_equal(a: &Record, b: &Record, k: usize) -> bool {
    match k {
        0 => a.p == b.p,
        1 => a.l == b.l,
        2 => a.t == b.t,
        3 => a.m == b.m,
        4 => a.elapsed == b.elapsed,
        5 => a.changed == b.changed,
        _ => a.same_v(b),
    }
}

proptest! {
    /// Property: decoding with carry-forward restores every record
    #[test]
    fn prop_roundtrip(records in prop::collection::vec(arb_record(), 1..100)) {
        let bytes = encode(&records).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: round trip holds on slow-changing data too
    #[test]
    fn prop_roundtrip_slow(records in arb_slow_stream()) {
        let bytes = encode(&records).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: the first row has all seven cells populated
    #[test]
    fn prop_first_row_complete(record in arb_record()) {
        let bytes = encode([record]).unwrap();
        let rows = cells(&bytes);
        prop_assert_eq!(rows.len(), 1);
        prop_assert_eq!(rows[0].len(), 7);
        for cell in &rows[0] {
            prop_assert!(!cell.is_empty());
        }
    }

    /// Property: a cell is empty iff its field equals the previous record's
    #[test]
    fn prop_suppression_exact(records in arb_slow_stream()) {
        let bytes = encode(&records).unwrap();
        let rows = cells(&bytes);
        prop_assert_eq!(rows.len(), records.len());
        for i in 1..records.len() {
            prop_assert_eq!(rows[i].len(), 7);
            for k in 0..7 {
                let unchanged = field_equal(&records[i], &records[i - 1], k);
                prop_assert_eq!(rows[i][k].is_empty(), unchanged,
                    "row {} cell {}: {:?}", i, k, rows[i]);
            }
        }
    }

    /// Property: every row has exactly six separators and one terminator
    #[test]
    fn prop_separator_invariance(records in arb_slow_stream()) {
        let bytes = encode(&records).unwrap();
        let s = std::str::from_utf8(&bytes).unwrap();
        for row in s.split_inclusive('\n').skip(1) {
            prop_assert_eq!(row.matches(',').count(), 6);
            prop_assert!(row.ends_with('\n'));
        }
    }

    /// Property: full mode decodes to the same records as carry-forward mode
    #[test]
    fn prop_modes_agree(records in arb_slow_stream()) {
        let delta = encode(&records).unwrap();
        let full = StreamEncoder::new().with_mode(Mode::Full).encode(&records).unwrap();
        prop_assert!(delta.len() <= full.len());
        prop_assert_eq!(decode(&delta).unwrap(), decode(&full).unwrap());
    }

    /// Property: encoding is deterministic
    #[test]
    fn prop_idempotent(records in prop::collection::vec(arb_record(), 0..50)) {
        let mut encoder = StreamEncoder::new();
        let a = encoder.encode(&records).unwrap();
        let b = encoder.encode(&records).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: the decoder never panics on arbitrary input
    #[test]
    fn prop_decode_arbitrary(body in prop::collection::vec(
        prop::sample::select(vec![b'0', b'1', b'9', b',', b'\n', b'.', b'-', b'x']), 0..200)
    ) {
        let mut input = b"p,l,t,m,elapsed,changed,v\n".to_vec();
        input.extend_from_slice(&body);
        let _ = decode(&input);
    }

    /// Property: integer text matches std formatting
    #[test]
    fn prop_text_of_matches_std(value in any::<u16>()) {
        prop_assert_eq!(text_of(value), value.to_string());
    }

    /// Property: digit-pair formatting matches std for any u64
    #[test]
    fn prop_digit_pairs_match_std(value in any::<u64>()) {
        let mut buf = crate::DigitBuf::new();
        prop_assert_eq!(crate::format_digit_pairs(value, &mut buf), value.to_string());
        prop_assert_eq!(crate::digits10(value), value.to_string().len());
    }
}
