//! Property-based tests for the resolve → fill → validate → serialize →
//! parse pipeline. Verifies invariants hold for generated records, not just
//! fixed examples.

use proptest::prelude::*;
use wfdb_rs::*;

prop_compose! {
    /// One channel entry. `depth` controls how far down the positional tail
    /// (adcres through signame) values are set; it is shared by every channel
    /// of a record because the tail fields have no defaults and a value on
    /// any channel makes the field required on all of them.
    fn arb_signal(depth: usize)(
        file in "[a-z][a-z0-9_]{0,7}\\.dat",
        fmt in prop::sample::select(vec!["8", "16", "80", "212", "24"]),
        gain in 1i64..=2000,
        baseline in -5000i64..=5000,
        units in prop::sample::select(vec!["mV", "uV", "mmHg", "NU"]),
        samps_per_frame in proptest::option::of(1u32..=8),
        adc_res in 1u32..=32,
        adc_zero in -4096i64..=4096,
        init_value in -4096i64..=4096,
        checksum in -32768i64..=32767,
        block_size in 0u64..=1024,
        sig_name in "[A-Za-z][A-Za-z0-9_]{0,7}",
    ) -> SignalSpec {
        let mut signal = SignalSpec::new(file, fmt);
        signal.adc_gain = Some(gain as f64);
        signal.baseline = Some(baseline);
        signal.units = Some(units.to_string());
        signal.samps_per_frame = samps_per_frame;
        if depth >= 1 {
            signal.adc_res = Some(adc_res);
        }
        if depth >= 2 {
            signal.adc_zero = Some(adc_zero);
        }
        if depth >= 3 {
            signal.init_value = Some(init_value);
        }
        if depth >= 4 {
            signal.checksum = Some(checksum);
        }
        if depth >= 5 {
            signal.block_size = Some(block_size);
        }
        if depth >= 6 {
            signal.sig_name = Some(sig_name);
        }
        signal
    }
}

prop_compose! {
    fn arb_record()(depth in 0usize..=6)(
        name in "[a-z][a-z0-9_]{0,7}",
        fs_halves in 100u32..=2000,
        sig_len in 0u64..=1_000_000,
        counter in proptest::option::of((1u32..=1000, proptest::option::of(0u32..=1000))),
        time in proptest::option::of((0u8..24, 0u8..60, 0u8..60)),
        date in proptest::option::of((1u8..=28, 1u8..=12, 1900u16..=2100)),
        signals in prop::collection::vec(arb_signal(depth), 0..4),
        comment in proptest::option::of("[a-z][a-z0-9 ]{0,18}[a-z0-9]"),
    ) -> Record {
        let mut record = Record::new(name);
        record.base.n_sig = Some(signals.len());
        record.base.fs = Some(f64::from(fs_halves) / 2.0);
        record.base.sig_len = Some(sig_len);
        if let Some((freq, base)) = counter {
            record.base.counter_freq = Some(f64::from(freq));
            record.base.base_counter = base.map(f64::from);
        }
        if let Some((h, m, s)) = time {
            record.base.base_time = Some(format!("{:02}:{:02}:{:02}", h, m, s));
            if let Some((d, mo, y)) = date {
                record.base.base_date = Some(format!("{:02}/{:02}/{}", d, mo, y));
            }
        }
        record.signals = signals;
        if let Some(c) = comment {
            record.base.comments.push(c);
        }
        record
    }
}

prop_compose! {
    fn arb_multi_record()(
        name in "[a-z][a-z0-9_]{0,7}",
        fs_halves in 100u32..=2000,
        n_sig in 0usize..=8,
        sig_len in 0u64..=1_000_000,
        segments in prop::collection::vec(
            ("[a-z][a-z0-9_]{0,7}", 0u64..=100_000),
            1..4,
        ),
    ) -> MultiRecord {
        let mut record = MultiRecord::new(name, segments.len() as i64);
        record.base.n_sig = Some(n_sig);
        record.base.fs = Some(f64::from(fs_halves) / 2.0);
        record.base.sig_len = Some(sig_len);
        for (seg_name, seg_len) in segments {
            record.segments.push(SegmentSpec::new(seg_name, seg_len));
        }
        record
    }
}

proptest! {
    /// A resolved and filled record validates cleanly and survives a
    /// serialize → parse round trip field for field.
    #[test]
    fn roundtrip_preserves_record_fields(record in arb_record()) {
        let mut filled = record;
        let fields = filled.required_fields().to_vec();
        filled.fill_defaults(&fields);

        let errors = validate(&Header::Single(filled.clone()), &fields);
        prop_assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        let lines = serialize(&Header::Single(filled.clone()), &fields);
        let reparsed = parse_header(&lines.join("\n")).unwrap();
        prop_assert_eq!(reparsed, Header::Single(filled));
    }

    /// Same round trip for multi-segment records.
    #[test]
    fn roundtrip_preserves_multi_record_fields(record in arb_multi_record()) {
        let mut filled = record;
        let fields = filled.required_fields().to_vec();
        filled.fill_defaults(&fields);

        let errors = validate(&Header::Multi(filled.clone()), &fields);
        prop_assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        let lines = serialize(&Header::Multi(filled.clone()), &fields);
        let reparsed = parse_header(&lines.join("\n")).unwrap();
        prop_assert_eq!(reparsed, Header::Multi(filled));
    }

    /// The required set always contains every ancestor of its members.
    #[test]
    fn required_set_is_dependency_closed(record in arb_record()) {
        let fields = record.required_fields();
        for name in &fields {
            let mut cur = spec::lookup(name).and_then(|s| s.dependency);
            while let Some(ancestor) = cur {
                prop_assert!(
                    fields.contains(&ancestor),
                    "{} resolved without ancestor {}",
                    name,
                    ancestor
                );
                cur = spec::lookup(ancestor).and_then(|s| s.dependency);
            }
        }
    }

    /// Filling defaults never overwrites a value the caller set.
    #[test]
    fn fill_never_overwrites(record in arb_record()) {
        let mut filled = record.clone();
        let fields = filled.required_fields().to_vec();
        filled.fill_defaults(&fields);

        prop_assert_eq!(filled.base.fs, record.base.fs);
        prop_assert_eq!(filled.base.base_time, record.base.base_time);
        for (after, before) in filled.signals.iter().zip(&record.signals) {
            prop_assert_eq!(after.adc_gain, before.adc_gain);
            prop_assert_eq!(after.baseline, before.baseline);
            prop_assert_eq!(&after.units, &before.units);
            prop_assert_eq!(after.adc_res, before.adc_res);
            prop_assert_eq!(after.checksum, before.checksum);
            if before.samps_per_frame.is_some() {
                prop_assert_eq!(after.samps_per_frame, before.samps_per_frame);
            }
            if before.sig_name.is_some() {
                prop_assert_eq!(&after.sig_name, &before.sig_name);
            }
        }
    }

    /// The parser rejects or accepts arbitrary text without panicking.
    #[test]
    fn parse_never_panics(text in "[ -~\n]{0,200}") {
        let _ = parse_header(&text);
    }
}
