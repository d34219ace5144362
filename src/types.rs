// src/types.rs
use std::fmt;

/// Primitive kinds a header field value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    /// A sequence of sub-records (the multi-segment `segments` field).
    /// Structural only; never rendered as a line token.
    RecordList,
}

impl FieldKind {
    /// Get the name of the kind as a string
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::RecordList => "record list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a record is described by signal lines or by segment lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Single,
    Multi,
}

impl fmt::Display for RecordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordMode::Single => f.write_str("single-segment"),
            RecordMode::Multi => f.write_str("multi-segment"),
        }
    }
}

/// A scalar field value extracted from, or destined for, a header line.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Check this value against a field's allowed kind set.
    ///
    /// An integer is accepted wherever a float is allowed; the text grammar
    /// cannot distinguish `360` from `360.0`.
    pub fn matches(&self, allowed: &[FieldKind]) -> bool {
        allowed.contains(&self.kind())
            || (self.kind() == FieldKind::Integer && allowed.contains(&FieldKind::Float))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => {
                // Keep whole-valued floats token-identical to their parsed form.
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Boolean(v) => write!(f, "{}", if *v { 1 } else { 0 }),
        }
    }
}
