// src/spec/table.rs
use crate::types::{FieldKind, RecordMode};

/// Static description of one header field: which kinds its value may take,
/// the delimiter that precedes it in the line grammar, the single parent
/// field that must also be present whenever this one is, and whether it is
/// mandatory in every written header.
///
/// Dependency links form finite acyclic chains by construction of the tables
/// below; traversal never needs a cycle guard.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub allowed: &'static [FieldKind],
    pub delimiter: &'static str,
    pub dependency: Option<&'static str>,
    pub write_required: bool,
}

pub type FieldDef = (&'static str, FieldSpec);

const fn field(
    allowed: &'static [FieldKind],
    delimiter: &'static str,
    dependency: Option<&'static str>,
    write_required: bool,
) -> FieldSpec {
    FieldSpec {
        allowed,
        delimiter,
        dependency,
        write_required,
    }
}

use FieldKind::{Float, Integer, RecordList, Text};

/// Record-line fields, in declaration order. `nseg` is what distinguishes a
/// multi-segment header; single-segment tables omit it (see [`record_fields`]).
pub const RECORD_BLOCK: &[FieldDef] = &[
    ("recordname", field(&[Text], "", None, true)),
    ("nseg", field(&[Integer], "/", Some("recordname"), true)),
    ("nsig", field(&[Integer], " ", Some("recordname"), true)),
    ("fs", field(&[Integer, Float], " ", Some("nsig"), true)),
    ("counterfreq", field(&[Integer, Float], "/", Some("fs"), false)),
    (
        "basecounter",
        field(&[Integer, Float], "(", Some("counterfreq"), false),
    ),
    ("siglen", field(&[Integer], " ", Some("fs"), true)),
    ("basetime", field(&[Text], " ", Some("siglen"), false)),
    ("basedate", field(&[Text], " ", Some("basetime"), false)),
];

/// Per-channel signal-line fields, in declaration order.
pub const SIGNAL_BLOCK: &[FieldDef] = &[
    ("filename", field(&[Text], "", None, true)),
    ("fmt", field(&[Integer, Text], " ", Some("filename"), true)),
    ("sampsperframe", field(&[Integer], "x", Some("fmt"), false)),
    ("skew", field(&[Integer], ":", Some("fmt"), false)),
    ("byteoffset", field(&[Integer], "+", Some("fmt"), false)),
    ("adcgain", field(&[Integer, Float], " ", Some("fmt"), true)),
    ("baseline", field(&[Integer], "(", Some("adcgain"), true)),
    ("units", field(&[Text], "/", Some("adcgain"), true)),
    ("adcres", field(&[Integer], " ", Some("adcgain"), false)),
    ("adczero", field(&[Integer], " ", Some("adcres"), false)),
    ("initvalue", field(&[Integer], " ", Some("adczero"), false)),
    ("checksum", field(&[Integer], " ", Some("initvalue"), false)),
    ("blocksize", field(&[Integer], " ", Some("checksum"), false)),
    ("signame", field(&[Text], " ", Some("blocksize"), false)),
];

/// Per-segment segment-line fields, in declaration order.
pub const SEGMENT_BLOCK: &[FieldDef] = &[
    ("segname", field(&[Text], "", None, true)),
    ("seglen", field(&[Integer], " ", Some("segname"), true)),
];

/// The structural segment list itself. Multi-segment records must carry it;
/// it never appears as a line token.
pub const SEGMENT_LIST_BLOCK: &[FieldDef] = &[("segments", field(&[RecordList], "", None, true))];

/// Free-text comment lines.
pub const COMMENT_BLOCK: &[FieldDef] = &[("comments", field(&[Text], "# ", None, false))];

static SINGLE_BLOCKS: [&[FieldDef]; 3] = [RECORD_BLOCK, SIGNAL_BLOCK, COMMENT_BLOCK];
static MULTI_BLOCKS: [&[FieldDef]; 4] = [
    SEGMENT_LIST_BLOCK,
    RECORD_BLOCK,
    SEGMENT_BLOCK,
    COMMENT_BLOCK,
];

/// The ordered field blocks relevant to records of the given mode.
pub fn blocks_for(mode: RecordMode) -> &'static [&'static [FieldDef]] {
    match mode {
        RecordMode::Single => &SINGLE_BLOCKS,
        RecordMode::Multi => &MULTI_BLOCKS,
    }
}

/// Record-block fields for the given mode, in declaration order.
///
/// Single-segment headers cannot carry `nseg`: even `nseg = 1` makes the
/// header multi-segment.
pub fn record_fields(
    mode: RecordMode,
) -> impl DoubleEndedIterator<Item = &'static FieldDef> + Clone {
    RECORD_BLOCK
        .iter()
        .filter(move |(name, _)| mode == RecordMode::Multi || *name != "nseg")
}

/// Look up a field's specification by name, across every block.
///
/// Field names are unique across blocks, so an unqualified lookup suffices.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    for block in [
        RECORD_BLOCK,
        SIGNAL_BLOCK,
        SEGMENT_BLOCK,
        SEGMENT_LIST_BLOCK,
        COMMENT_BLOCK,
    ] {
        if let Some((_, spec)) = block.iter().find(|(n, _)| *n == name) {
            return Some(spec);
        }
    }
    None
}

/// Every field name a record of the given mode may legally carry.
///
/// Used by the validator to reject foreign fields.
pub fn allowed_field_names(mode: RecordMode) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = record_fields(mode).map(|(n, _)| *n).collect();
    match mode {
        RecordMode::Single => names.extend(SIGNAL_BLOCK.iter().map(|(n, _)| *n)),
        RecordMode::Multi => {
            names.extend(SEGMENT_LIST_BLOCK.iter().map(|(n, _)| *n));
            names.extend(SEGMENT_BLOCK.iter().map(|(n, _)| *n));
        }
    }
    names.extend(COMMENT_BLOCK.iter().map(|(n, _)| *n));
    names
}
