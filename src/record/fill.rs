// src/record/fill.rs
//! Default inference for missing fields.
//!
//! Filling never overwrites a value already present. Record-level defaults
//! apply only to fields in the resolved set; per-channel defaults are the
//! same deterministic list the read path applies, so a filled record and its
//! re-parsed serialization agree field for field.

use crate::record::{MultiRecord, Record, SignalSpec};

/// Default sampling frequency when the record line omits `fs`.
pub const DEFAULT_FS: f64 = 250.0;

/// Default ADC gain when the signal line omits it.
pub const DEFAULT_ADC_GAIN: f64 = 200.0;

/// Default physical units when the signal line omits them.
pub const DEFAULT_UNITS: &str = "mV";

impl Record {
    /// Fill missing-but-inferable fields, in the resolver's output order.
    pub fn fill_defaults(&mut self, fields: &[&'static str]) {
        if fields.contains(&"fs") && self.base.fs.is_none() {
            self.base.fs = Some(DEFAULT_FS);
        }
        for (index, signal) in self.signals.iter_mut().enumerate() {
            signal.fill_channel_defaults(index);
        }
    }
}

impl MultiRecord {
    pub fn fill_defaults(&mut self, fields: &[&'static str]) {
        if fields.contains(&"fs") && self.base.fs.is_none() {
            self.base.fs = Some(DEFAULT_FS);
        }
    }
}

impl SignalSpec {
    /// Apply the per-channel defaults for the channel at 0-based `index`.
    ///
    /// `adcres`, `adczero`, `checksum` and `blocksize` have no defaults and
    /// stay absent. A missing `baseline` takes the channel's `adczero` value
    /// when that is present, else 0; this is a quirk of the format, not a
    /// simplification.
    pub fn fill_channel_defaults(&mut self, index: usize) {
        if self.samps_per_frame.is_none() {
            self.samps_per_frame = Some(1);
        }
        if self.skew.is_none() {
            self.skew = Some(0);
        }
        if self.byte_offset.is_none() {
            self.byte_offset = Some(0);
        }
        if self.adc_gain.is_none() {
            self.adc_gain = Some(DEFAULT_ADC_GAIN);
        }
        if self.baseline.is_none() {
            self.baseline = Some(self.adc_zero.unwrap_or(0));
        }
        if self.units.is_none() {
            self.units = Some(DEFAULT_UNITS.to_string());
        }
        if self.init_value.is_none() {
            self.init_value = Some(0);
        }
        if self.sig_name.is_none() {
            self.sig_name = Some(format!("ch{}", index + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_never_overwrites() {
        let mut record = Record::new("100");
        record.base.fs = Some(360.0);
        record.signals.push(SignalSpec {
            adc_gain: Some(1000.0),
            units: Some("uV".into()),
            sig_name: Some("MLII".into()),
            ..SignalSpec::default()
        });

        let before = record.clone();
        let fields = record.required_fields();
        record.fill_defaults(&fields);

        assert_eq!(record.base.fs, Some(360.0));
        assert_eq!(record.signals[0].adc_gain, Some(1000.0));
        assert_eq!(record.signals[0].units.as_deref(), Some("uV"));
        assert_eq!(record.signals[0].sig_name.as_deref(), Some("MLII"));

        // Everything that was non-empty before is unchanged.
        assert_eq!(before.base.fs, record.base.fs);
        assert_eq!(before.signals[0].adc_gain, record.signals[0].adc_gain);
    }

    #[test]
    fn test_fs_default() {
        let mut record = Record::new("100");
        let fields = record.required_fields();
        record.fill_defaults(&fields);
        assert_eq!(record.base.fs, Some(250.0));
    }

    #[test]
    fn test_channel_defaults() {
        let mut record = Record::new("100");
        record.signals.push(SignalSpec::new("100.dat", "212"));
        record.signals.push(SignalSpec::new("100.dat", "212"));

        let fields = record.required_fields();
        record.fill_defaults(&fields);

        let first = &record.signals[0];
        assert_eq!(first.samps_per_frame, Some(1));
        assert_eq!(first.skew, Some(0));
        assert_eq!(first.byte_offset, Some(0));
        assert_eq!(first.adc_gain, Some(200.0));
        assert_eq!(first.baseline, Some(0));
        assert_eq!(first.units.as_deref(), Some("mV"));
        assert_eq!(first.init_value, Some(0));
        assert_eq!(first.sig_name.as_deref(), Some("ch1"));
        assert_eq!(record.signals[1].sig_name.as_deref(), Some("ch2"));

        assert_eq!(first.adc_res, None);
        assert_eq!(first.adc_zero, None);
        assert_eq!(first.checksum, None);
        assert_eq!(first.block_size, None);
    }

    #[test]
    fn test_baseline_takes_adczero_when_present() {
        let mut with_zero = SignalSpec {
            adc_zero: Some(1024),
            ..SignalSpec::default()
        };
        with_zero.fill_channel_defaults(0);
        assert_eq!(with_zero.baseline, Some(1024));

        let mut without = SignalSpec::default();
        without.fill_channel_defaults(0);
        assert_eq!(without.baseline, Some(0));
    }

    #[test]
    fn test_multi_record_fill() {
        let mut record = MultiRecord::new("m", 2);
        let fields = record.required_fields();
        record.fill_defaults(&fields);
        assert_eq!(record.base.fs, Some(250.0));
    }
}
