// src/parser/segment_line.rs
//! Tokenizer for segment lines: `segname seglen`

use crate::error::Result;
use crate::parser::{malformed, parse_uint};
use crate::record::SegmentSpec;
use crate::types::RecordMode;

pub(crate) fn parse(line: &str, line_no: usize) -> Result<SegmentSpec> {
    let mode = RecordMode::Multi;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(malformed(line_no, mode));
    }

    let name = tokens[0];
    if name.is_empty() || !name.chars().all(is_segname_char) {
        return Err(malformed(line_no, mode));
    }
    let seg_len = parse_uint(tokens[1], "seglen")?;

    Ok(SegmentSpec {
        seg_name: Some(name.to_string()),
        seg_len: Some(seg_len),
    })
}

fn is_segname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '~' || c == '-'
}
