// src/error.rs
use crate::types::RecordMode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("invalid type for field {field}: expected {expected}, found {actual}")]
    InvalidFieldType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("unrecognized field: {0}")]
    ForeignField(String),

    #[error("field {field} requires {missing_ancestor} to also be present")]
    DependencyViolation {
        field: String,
        missing_ancestor: String,
    },

    #[error("declared {expected} entries but found {actual}")]
    InconsistentEntityCount { expected: usize, actual: usize },

    #[error("invalid segment count: {0}")]
    InvalidSegmentCount(i64),

    #[error("malformed {mode} header line {line}")]
    MalformedHeaderLine { line: usize, mode: RecordMode },

    #[error("header validation failed with {} error(s)", .0.len())]
    Validation(Vec<HeaderError>),
}

pub type Result<T> = std::result::Result<T, HeaderError>;
