// src/writer.rs
//! Serialization and the header-writing pipelines.
//!
//! `serialize` assumes the record already passed validation and does not
//! re-validate. The write pipelines run resolve → fill → validate →
//! serialize → write on a clone of the caller's record, so the caller's
//! instance is never mutated.

use crate::error::{HeaderError, Result};
use crate::record::{Header, MultiRecord, Record, SegmentSpec, SignalSpec};
use crate::spec;
use crate::types::{FieldValue, RecordMode};
use crate::validator;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialize a validated header to its text lines.
pub fn serialize(header: &Header, fields: &[&'static str]) -> Vec<String> {
    match header {
        Header::Single(record) => serialize_record(record, fields),
        Header::Multi(record) => serialize_multi_record(record, fields),
    }
}

/// Serialize a validated single-segment record: the record line, one line per
/// channel in original order, then the comments.
pub fn serialize_record(record: &Record, fields: &[&'static str]) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + record.signals.len());
    lines.push(render_line(
        spec::record_fields(RecordMode::Single),
        fields,
        &|name| record.base.field_value(name),
    ));
    for signal in &record.signals {
        lines.push(render_signal_line(signal, fields));
    }
    append_comments(&mut lines, &record.base.comments, fields);
    lines
}

/// Serialize a validated multi-segment record: the record line (with
/// `/nseg`), one line per segment in original order, then the comments.
pub fn serialize_multi_record(record: &MultiRecord, fields: &[&'static str]) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + record.segments.len());
    lines.push(render_line(
        spec::record_fields(RecordMode::Multi),
        fields,
        &|name| match name {
            "nseg" => record.n_seg.map(FieldValue::Integer),
            _ => record.base.field_value(name),
        },
    ));
    for segment in &record.segments {
        lines.push(render_segment_line(segment, fields));
    }
    append_comments(&mut lines, &record.base.comments, fields);
    lines
}

/// Write a single-segment header file `<recordname>.hea` into `target_dir`
/// (pass `"."` for the current working directory).
pub fn write_header(record: &Record, target_dir: impl AsRef<Path>) -> Result<()> {
    let mut record = record.clone();
    let fields = record.required_fields();
    record.fill_defaults(&fields);

    let errors = validator::validate_record(&record, &fields);
    if !errors.is_empty() {
        return Err(HeaderError::Validation(errors));
    }

    let name = record
        .base
        .record_name
        .clone()
        .ok_or_else(|| HeaderError::MissingRequiredField("recordname".to_string()))?;
    let lines = serialize_record(&record, &fields);
    write_lines(&name, target_dir.as_ref(), &lines)
}

/// Write a multi-segment header file `<recordname>.hea` into `target_dir`.
///
/// A segment count that is absent or not positive is fatal and nothing is
/// written; a count of exactly 1 is legal but unusual and logs a warning.
pub fn write_multi_header(record: &MultiRecord, target_dir: impl AsRef<Path>) -> Result<()> {
    match record.n_seg {
        None => {
            return Err(HeaderError::MissingRequiredField("nseg".to_string()));
        }
        Some(n_seg) if n_seg <= 0 => {
            return Err(HeaderError::InvalidSegmentCount(n_seg));
        }
        Some(_) => {}
    }

    let mut record = record.clone();
    let fields = record.required_fields();
    record.fill_defaults(&fields);

    let errors = validator::validate_multi_record(&record, &fields);
    if !errors.is_empty() {
        return Err(HeaderError::Validation(errors));
    }

    let name = record
        .base
        .record_name
        .clone()
        .ok_or_else(|| HeaderError::MissingRequiredField("recordname".to_string()))?;
    let lines = serialize_multi_record(&record, &fields);
    write_lines(&name, target_dir.as_ref(), &lines)
}

fn write_lines(name: &str, target_dir: &Path, lines: &[String]) -> Result<()> {
    let path = target_dir.join(format!("{}.hea", name));
    let io_err = |source, path: &PathBuf| HeaderError::Io {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(|e| io_err(e, &path))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| io_err(e, &path))?;
    }
    out.flush().map_err(|e| io_err(e, &path))?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "wrote header file");
    Ok(())
}

/// Render one line by walking a block in declaration order, emitting each
/// resolved, populated field behind its delimiter. `(`-delimited fields get
/// their closing parenthesis here.
fn render_line<'a>(
    block: impl Iterator<Item = &'a spec::FieldDef>,
    fields: &[&'static str],
    value_of: &dyn Fn(&str) -> Option<FieldValue>,
) -> String {
    let mut line = String::new();
    for (name, field_spec) in block {
        if !fields.contains(name) {
            continue;
        }
        let Some(value) = value_of(name) else {
            continue;
        };
        if field_spec.delimiter == "(" {
            let _ = write!(line, "({})", value);
        } else {
            let _ = write!(line, "{}{}", field_spec.delimiter, value);
        }
    }
    line
}

fn render_signal_line(signal: &SignalSpec, fields: &[&'static str]) -> String {
    render_line(spec::SIGNAL_BLOCK.iter(), fields, &|name| {
        signal.field_value(name)
    })
}

fn render_segment_line(segment: &SegmentSpec, fields: &[&'static str]) -> String {
    render_line(spec::SEGMENT_BLOCK.iter(), fields, &|name| {
        segment.field_value(name)
    })
}

fn append_comments(lines: &mut Vec<String>, comments: &[String], fields: &[&'static str]) {
    if !fields.contains(&"comments") {
        return;
    }
    let delimiter = spec::lookup("comments").map_or("# ", |s| s.delimiter);
    for comment in comments {
        lines.push(format!("{}{}", delimiter, comment));
    }
}
