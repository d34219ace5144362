// src/validator.rs
//! Field-set validation.
//!
//! Validation is pure over a record snapshot and accumulates every violation
//! it finds rather than stopping at the first, so a caller sees all problems
//! at once. An empty result means the record is write-ready.

use crate::error::HeaderError;
use crate::record::{Header, MultiRecord, Record, RecordHeader, SignalSpec};
use crate::spec;
use crate::types::{FieldKind, RecordMode};

/// Validate a header of either mode against the resolved field set.
pub fn validate(header: &Header, fields: &[&'static str]) -> Vec<HeaderError> {
    match header {
        Header::Single(record) => validate_record(record, fields),
        Header::Multi(record) => validate_multi_record(record, fields),
    }
}

/// Validate a single-segment record.
pub fn validate_record(record: &Record, fields: &[&'static str]) -> Vec<HeaderError> {
    let mut errors = Vec::new();

    check_extra_fields(&record.base, RecordMode::Single, &mut errors);
    check_record_block(&record.base, RecordMode::Single, fields, &mut errors);

    for &name in fields {
        match name {
            "comments" => {} // presence is what put it in the set
            name if in_block(spec::SIGNAL_BLOCK, name) => {
                if record
                    .signals
                    .iter()
                    .any(|s| s.field_value(name).is_none())
                {
                    errors.push(HeaderError::MissingRequiredField(name.to_string()));
                }
            }
            name => {
                if record.base.field_value(name).is_none() {
                    errors.push(HeaderError::MissingRequiredField(name.to_string()));
                }
            }
        }
    }

    for signal in &record.signals {
        check_signal_entry(signal, fields, &mut errors);
    }

    // The format stores the sampling context once on the record line, so the
    // per-channel consistency requirement reduces to a count check.
    if let Some(n_sig) = record.base.n_sig {
        if n_sig != record.signals.len() {
            errors.push(HeaderError::InconsistentEntityCount {
                expected: n_sig,
                actual: record.signals.len(),
            });
        }
    }

    errors
}

/// Validate a multi-segment record.
pub fn validate_multi_record(record: &MultiRecord, fields: &[&'static str]) -> Vec<HeaderError> {
    let mut errors = Vec::new();

    check_extra_fields(&record.base, RecordMode::Multi, &mut errors);
    check_record_block(&record.base, RecordMode::Multi, fields, &mut errors);

    for &name in fields {
        match name {
            "comments" | "segments" => {}
            "nseg" => {
                if record.n_seg.is_none() {
                    errors.push(HeaderError::MissingRequiredField(name.to_string()));
                }
            }
            name if in_block(spec::SEGMENT_BLOCK, name) => {
                if record
                    .segments
                    .iter()
                    .any(|s| s.field_value(name).is_none())
                {
                    errors.push(HeaderError::MissingRequiredField(name.to_string()));
                }
            }
            name => {
                if record.base.field_value(name).is_none() {
                    errors.push(HeaderError::MissingRequiredField(name.to_string()));
                }
            }
        }
    }

    match record.n_seg {
        Some(n_seg) if n_seg <= 0 => errors.push(HeaderError::InvalidSegmentCount(n_seg)),
        Some(n_seg) => {
            if n_seg == 1 {
                tracing::warn!(
                    record = record.base.record_name.as_deref().unwrap_or("<unnamed>"),
                    "multi-segment header describes exactly one segment"
                );
            }
            if n_seg as usize != record.segments.len() {
                errors.push(HeaderError::InconsistentEntityCount {
                    expected: n_seg as usize,
                    actual: record.segments.len(),
                });
            }
        }
        None => {}
    }

    errors
}

/// Flag dynamically set fields that did not route to a typed member: names
/// outside the mode's tables are foreign, allowed names carrying the wrong
/// kind are type errors.
fn check_extra_fields(base: &RecordHeader, mode: RecordMode, errors: &mut Vec<HeaderError>) {
    let allowed = spec::allowed_field_names(mode);
    for (name, value) in &base.extra {
        match allowed.iter().find(|n| **n == name.as_str()) {
            None => errors.push(HeaderError::ForeignField(name.clone())),
            Some(_) => {
                if let Some(field_spec) = spec::lookup(name) {
                    if !value.matches(field_spec.allowed) {
                        errors.push(HeaderError::InvalidFieldType {
                            field: name.clone(),
                            expected: expected_kinds(field_spec.allowed),
                            actual: value.kind().name().to_string(),
                        });
                    }
                }
            }
        }
    }
}

/// Kind-check populated record-line values, and re-check the dependency link
/// of every field that is about to be written. Fields outside the resolved
/// set are never serialized, so a missing ancestor there is harmless (the
/// read path fills `initvalue` and `signame` without their ancestors).
fn check_record_block(
    base: &RecordHeader,
    mode: RecordMode,
    fields: &[&'static str],
    errors: &mut Vec<HeaderError>,
) {
    for (name, field_spec) in spec::record_fields(mode) {
        let Some(value) = base.field_value(name) else {
            continue;
        };
        if !value.matches(field_spec.allowed) {
            errors.push(HeaderError::InvalidFieldType {
                field: name.to_string(),
                expected: expected_kinds(field_spec.allowed),
                actual: value.kind().name().to_string(),
            });
        }
        if !fields.contains(name) {
            continue;
        }
        if let Some(ancestor) = field_spec.dependency {
            if base.field_value(ancestor).is_none() {
                errors.push(HeaderError::DependencyViolation {
                    field: name.to_string(),
                    missing_ancestor: ancestor.to_string(),
                });
            }
        }
    }
}

fn check_signal_entry(
    signal: &SignalSpec,
    fields: &[&'static str],
    errors: &mut Vec<HeaderError>,
) {
    for (name, field_spec) in spec::SIGNAL_BLOCK.iter() {
        let Some(value) = signal.field_value(name) else {
            continue;
        };
        if !value.matches(field_spec.allowed) {
            errors.push(HeaderError::InvalidFieldType {
                field: name.to_string(),
                expected: expected_kinds(field_spec.allowed),
                actual: value.kind().name().to_string(),
            });
        }
        if !fields.contains(name) {
            continue;
        }
        if let Some(ancestor) = field_spec.dependency {
            if signal.field_value(ancestor).is_none() {
                errors.push(HeaderError::DependencyViolation {
                    field: name.to_string(),
                    missing_ancestor: ancestor.to_string(),
                });
            }
        }
    }
}

fn in_block(block: &[spec::FieldDef], name: &str) -> bool {
    block.iter().any(|(n, _)| *n == name)
}

fn expected_kinds(allowed: &[FieldKind]) -> String {
    allowed
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(" or ")
}
