// src/spec/resolver.rs
use crate::record::{MultiRecord, Record};
use crate::spec::table::{self, FieldDef};
use crate::types::RecordMode;
use smallvec::SmallVec;

/// Ordered, deduplicated set of field names. Headers carry at most 25 field
/// names, so this stays on the stack.
pub type FieldSet = SmallVec<[&'static str; 24]>;

/// Compute the fields that must be present to serialize a valid
/// single-segment header.
///
/// Blocks are walked in reverse declaration order so that leaf-most
/// dependents surface first; each candidate (write-required, or populated on
/// the record) pulls in its whole dependency chain. The resulting order is
/// the fill order and decides which ancestor-missing errors surface first.
pub fn required_fields(record: &Record) -> FieldSet {
    let mut out = FieldSet::new();

    required_subset(
        table::record_fields(RecordMode::Single),
        &|name| record.base.field_value(name).is_some(),
        &mut out,
    );

    if !record.signals.is_empty() {
        required_subset(
            table::SIGNAL_BLOCK.iter(),
            &|name| record.signals.iter().any(|s| s.field_value(name).is_some()),
            &mut out,
        );
    }

    if !record.base.comments.is_empty() {
        out.push("comments");
    }
    out
}

/// Compute the required field set for a multi-segment header.
pub fn required_multi_fields(record: &MultiRecord) -> FieldSet {
    let mut out = FieldSet::new();

    required_subset(
        table::record_fields(RecordMode::Multi),
        &|name| match name {
            "nseg" => record.n_seg.is_some(),
            _ => record.base.field_value(name).is_some(),
        },
        &mut out,
    );

    if !record.segments.is_empty() {
        add_with_dependencies("segments", &mut out);
        required_subset(
            table::SEGMENT_BLOCK.iter(),
            &|name| {
                record
                    .segments
                    .iter()
                    .any(|s| s.field_value(name).is_some())
            },
            &mut out,
        );
    }

    if !record.base.comments.is_empty() {
        out.push("comments");
    }
    out
}

fn required_subset<'a>(
    block: impl DoubleEndedIterator<Item = &'a FieldDef>,
    has_value: &dyn Fn(&str) -> bool,
    out: &mut FieldSet,
) {
    for &(name, spec) in block.rev() {
        if spec.write_required || has_value(name) {
            add_with_dependencies(name, out);
        }
    }
}

/// Append `name` and every ancestor on its dependency chain, skipping names
/// already present so first-seen order is preserved.
fn add_with_dependencies(name: &'static str, out: &mut FieldSet) {
    let mut cur = Some(name);
    while let Some(n) = cur {
        if !out.contains(&n) {
            out.push(n);
        }
        cur = table::lookup(n).and_then(|spec| spec.dependency);
    }
}
