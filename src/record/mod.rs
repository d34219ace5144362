// src/record/mod.rs
mod fill;

pub use fill::{DEFAULT_ADC_GAIN, DEFAULT_FS, DEFAULT_UNITS};

use crate::spec;
use crate::types::{FieldValue, RecordMode};

/// Record-level fields shared by single- and multi-segment records.
///
/// Every member is optional; a header is assembled field-by-field (or by the
/// parser) and the dependency resolver decides what must end up present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordHeader {
    pub record_name: Option<String>,
    pub n_sig: Option<usize>,
    pub fs: Option<f64>,
    pub counter_freq: Option<f64>,
    pub base_counter: Option<f64>,
    pub sig_len: Option<u64>,
    pub base_time: Option<String>,
    pub base_date: Option<String>,
    pub comments: Vec<String>,

    /// Dynamically set fields that did not route to a typed member: foreign
    /// names, or known names given a value of the wrong kind. The validator
    /// reports each of these.
    pub extra: Vec<(String, FieldValue)>,
}

impl RecordHeader {
    /// Typed-member lookup by field name. This is the reflection-free
    /// accessor table the resolver, validator and writer iterate with.
    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "recordname" => self.record_name.clone().map(FieldValue::Text),
            "nsig" => self.n_sig.map(|v| FieldValue::Integer(v as i64)),
            "fs" => self.fs.map(FieldValue::Float),
            "counterfreq" => self.counter_freq.map(FieldValue::Float),
            "basecounter" => self.base_counter.map(FieldValue::Float),
            "siglen" => self.sig_len.map(|v| FieldValue::Integer(v as i64)),
            "basetime" => self.base_time.clone().map(FieldValue::Text),
            "basedate" => self.base_date.clone().map(FieldValue::Text),
            _ => None,
        }
    }

    /// Try to route a dynamically named value into its typed member.
    /// Returns false when the name is unknown here or the kind does not fit.
    fn assign(&mut self, name: &str, value: &FieldValue) -> bool {
        match (name, value) {
            ("recordname", FieldValue::Text(v)) => self.record_name = Some(v.clone()),
            ("nsig", FieldValue::Integer(v)) if *v >= 0 => self.n_sig = Some(*v as usize),
            ("fs", FieldValue::Integer(v)) => self.fs = Some(*v as f64),
            ("fs", FieldValue::Float(v)) => self.fs = Some(*v),
            ("counterfreq", FieldValue::Integer(v)) => self.counter_freq = Some(*v as f64),
            ("counterfreq", FieldValue::Float(v)) => self.counter_freq = Some(*v),
            ("basecounter", FieldValue::Integer(v)) => self.base_counter = Some(*v as f64),
            ("basecounter", FieldValue::Float(v)) => self.base_counter = Some(*v),
            ("siglen", FieldValue::Integer(v)) if *v >= 0 => self.sig_len = Some(*v as u64),
            ("basetime", FieldValue::Text(v)) => self.base_time = Some(v.clone()),
            ("basedate", FieldValue::Text(v)) => self.base_date = Some(v.clone()),
            ("comments", FieldValue::Text(v)) => self.comments.push(v.clone()),
            _ => return false,
        }
        true
    }
}

/// Per-channel encoding parameters, one entry per signal line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSpec {
    pub file_name: Option<String>,
    pub fmt: Option<String>,
    pub samps_per_frame: Option<u32>,
    pub skew: Option<u32>,
    pub byte_offset: Option<u64>,
    pub adc_gain: Option<f64>,
    pub baseline: Option<i64>,
    pub units: Option<String>,
    pub adc_res: Option<u32>,
    pub adc_zero: Option<i64>,
    pub init_value: Option<i64>,
    pub checksum: Option<i64>,
    pub block_size: Option<u64>,
    pub sig_name: Option<String>,
}

impl SignalSpec {
    pub fn new(file_name: impl Into<String>, fmt: impl Into<String>) -> Self {
        SignalSpec {
            file_name: Some(file_name.into()),
            fmt: Some(fmt.into()),
            ..SignalSpec::default()
        }
    }

    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "filename" => self.file_name.clone().map(FieldValue::Text),
            "fmt" => self.fmt.clone().map(FieldValue::Text),
            "sampsperframe" => self.samps_per_frame.map(|v| FieldValue::Integer(v as i64)),
            "skew" => self.skew.map(|v| FieldValue::Integer(v as i64)),
            "byteoffset" => self.byte_offset.map(|v| FieldValue::Integer(v as i64)),
            "adcgain" => self.adc_gain.map(FieldValue::Float),
            "baseline" => self.baseline.map(FieldValue::Integer),
            "units" => self.units.clone().map(FieldValue::Text),
            "adcres" => self.adc_res.map(|v| FieldValue::Integer(v as i64)),
            "adczero" => self.adc_zero.map(FieldValue::Integer),
            "initvalue" => self.init_value.map(FieldValue::Integer),
            "checksum" => self.checksum.map(FieldValue::Integer),
            "blocksize" => self.block_size.map(|v| FieldValue::Integer(v as i64)),
            "signame" => self.sig_name.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

/// One entry per segment line of a multi-segment header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentSpec {
    pub seg_name: Option<String>,
    pub seg_len: Option<u64>,
}

impl SegmentSpec {
    pub fn new(seg_name: impl Into<String>, seg_len: u64) -> Self {
        SegmentSpec {
            seg_name: Some(seg_name.into()),
            seg_len: Some(seg_len),
        }
    }

    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "segname" => self.seg_name.clone().map(FieldValue::Text),
            "seglen" => self.seg_len.map(|v| FieldValue::Integer(v as i64)),
            _ => None,
        }
    }
}

/// A single-segment record: record-level fields plus one [`SignalSpec`] per
/// channel. The record exclusively owns its channel entries and comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub base: RecordHeader,
    pub signals: Vec<SignalSpec>,
}

impl Record {
    pub fn new(record_name: impl Into<String>) -> Self {
        Record {
            base: RecordHeader {
                record_name: Some(record_name.into()),
                ..RecordHeader::default()
            },
            signals: Vec::new(),
        }
    }

    pub fn mode(&self) -> RecordMode {
        RecordMode::Single
    }

    /// Set a record-level field by name.
    ///
    /// Names outside the single-segment tables, or values of a kind the field
    /// does not allow, are retained and reported by validation rather than
    /// silently dropped.
    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        if !self.base.assign(name, &value) {
            self.base.extra.push((name.to_string(), value));
        }
    }

    /// The ordered set of fields needed to serialize this record.
    pub fn required_fields(&self) -> spec::FieldSet {
        spec::required_fields(self)
    }
}

/// A multi-segment record: record-level fields, the declared segment count
/// and one [`SegmentSpec`] per segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiRecord {
    pub base: RecordHeader,
    pub n_seg: Option<i64>,
    pub segments: Vec<SegmentSpec>,
}

impl MultiRecord {
    pub fn new(record_name: impl Into<String>, n_seg: i64) -> Self {
        MultiRecord {
            base: RecordHeader {
                record_name: Some(record_name.into()),
                ..RecordHeader::default()
            },
            n_seg: Some(n_seg),
            segments: Vec::new(),
        }
    }

    pub fn mode(&self) -> RecordMode {
        RecordMode::Multi
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        if name == "nseg" {
            if let FieldValue::Integer(v) = value {
                self.n_seg = Some(v);
                return;
            }
        }
        if !self.base.assign(name, &value) {
            self.base.extra.push((name.to_string(), value));
        }
    }

    pub fn required_fields(&self) -> spec::FieldSet {
        spec::required_multi_fields(self)
    }
}

/// A parsed header of either mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Header {
    Single(Record),
    Multi(MultiRecord),
}

impl Header {
    pub fn mode(&self) -> RecordMode {
        match self {
            Header::Single(_) => RecordMode::Single,
            Header::Multi(_) => RecordMode::Multi,
        }
    }

    pub fn record_name(&self) -> Option<&str> {
        self.base().record_name.as_deref()
    }

    pub fn base(&self) -> &RecordHeader {
        match self {
            Header::Single(r) => &r.base,
            Header::Multi(r) => &r.base,
        }
    }
}
