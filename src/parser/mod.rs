// src/parser/mod.rs
//! Line grammar parser for header text.
//!
//! Comment lines (and trailing `#` suffixes) are stripped into a separate
//! comment sequence before structural parsing begins. The first content line
//! is the record line; `/nseg` on its first token selects multi-segment mode
//! (including `/1`), and the following content lines are signal or segment
//! lines accordingly. Blank lines are ignored. Grammar errors are fail-fast
//! and carry the 1-based line number of the offending line.

mod record_line;
mod segment_line;
mod signal_line;

use crate::error::{HeaderError, Result};
use crate::record::{Header, MultiRecord, Record, RecordHeader};
use crate::types::RecordMode;

/// Parse already-loaded header text into a record of the appropriate mode.
pub fn parse_header(text: &str) -> Result<Header> {
    let (content, comments) = split_lines(text);

    let (first_no, first_text) = *content.first().ok_or(HeaderError::MalformedHeaderLine {
        line: 1,
        mode: RecordMode::Single,
    })?;
    let rec = record_line::parse(first_text, first_no)?;

    let base = RecordHeader {
        record_name: Some(rec.name),
        n_sig: Some(rec.n_sig),
        fs: Some(rec.fs),
        counter_freq: rec.counter_freq,
        base_counter: rec.base_counter,
        sig_len: rec.sig_len,
        base_time: rec.base_time,
        base_date: rec.base_date,
        comments,
        extra: Vec::new(),
    };

    match rec.n_seg {
        Some(n_seg) => {
            // Zero segments is fatal before any segment line is touched.
            if n_seg <= 0 {
                return Err(HeaderError::InvalidSegmentCount(n_seg));
            }
            // The declared count comes straight from the input; cap the
            // preallocation by the lines actually present.
            let mut segments =
                Vec::with_capacity((n_seg as usize).min(content.len().saturating_sub(1)));
            for i in 0..n_seg as usize {
                let (number, line) =
                    *content
                        .get(i + 1)
                        .ok_or(HeaderError::InconsistentEntityCount {
                            expected: n_seg as usize,
                            actual: content.len() - 1,
                        })?;
                segments.push(segment_line::parse(line, number)?);
            }
            Ok(Header::Multi(MultiRecord {
                base,
                n_seg: Some(n_seg),
                segments,
            }))
        }
        None => {
            let mut signals =
                Vec::with_capacity(rec.n_sig.min(content.len().saturating_sub(1)));
            for i in 0..rec.n_sig {
                let (number, line) =
                    *content
                        .get(i + 1)
                        .ok_or(HeaderError::InconsistentEntityCount {
                            expected: rec.n_sig,
                            actual: content.len() - 1,
                        })?;
                signals.push(signal_line::parse(line, i, number)?);
            }
            Ok(Header::Single(Record { base, signals }))
        }
    }
}

/// Separate content lines (with their original 1-based numbers) from comment
/// text. A `#` at the start of a line makes the whole line a comment; a `#`
/// further in starts a same-line trailing comment.
fn split_lines(text: &str) -> (Vec<(usize, &str)>, Vec<String>) {
    let mut content = Vec::new();
    let mut comments = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match line.find('#') {
            Some(0) => comments.push(strip_comment(line)),
            Some(ci) => {
                content.push((idx + 1, line[..ci].trim_end()));
                comments.push(strip_comment(&line[ci..]));
            }
            None => content.push((idx + 1, line)),
        }
    }
    (content, comments)
}

fn strip_comment(line: &str) -> String {
    line.trim_matches(|c: char| c == '#' || c.is_whitespace())
        .to_string()
}

/// Parse a non-empty token in an integer position.
pub(crate) fn parse_int(token: &str, field: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| HeaderError::InvalidFieldType {
            field: field.to_string(),
            expected: "integer".to_string(),
            actual: token.to_string(),
        })
}

/// As [`parse_int`] but for unsigned positions, parsed at the target width
/// so an oversized token errors instead of wrapping.
pub(crate) fn parse_uint<T: std::str::FromStr>(token: &str, field: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| HeaderError::InvalidFieldType {
            field: field.to_string(),
            expected: "integer".to_string(),
            actual: token.to_string(),
        })
}

/// Parse a non-empty token in a float position.
pub(crate) fn parse_float(token: &str, field: &str) -> Result<f64> {
    token
        .parse()
        .map_err(|_| HeaderError::InvalidFieldType {
            field: field.to_string(),
            expected: "float".to_string(),
            actual: token.to_string(),
        })
}

pub(crate) fn malformed(line: usize, mode: RecordMode) -> HeaderError {
    HeaderError::MalformedHeaderLine { line, mode }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_strips_comments() {
        let text = "100 2 360 650000  # trailing note\n\
                    100.dat 212 200/mV\n\
                    100.dat 212 200/mV\n\
                    \n\
                    # a full comment line\n\
                    ## doubled marker\n";
        let (content, comments) = split_lines(text);
        assert_eq!(content.len(), 3);
        assert_eq!(content[0], (1, "100 2 360 650000"));
        assert_eq!(content[1], (2, "100.dat 212 200/mV"));
        assert_eq!(
            comments,
            vec!["trailing note", "a full comment line", "doubled marker"]
        );
    }

    #[test]
    fn test_blank_lines_ignored() {
        let (content, comments) = split_lines("\n\n100 1\n\nch.dat 8\n");
        assert_eq!(content, vec![(3, "100 1"), (5, "ch.dat 8")]);
        assert!(comments.is_empty());
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(
            parse_header(""),
            Err(HeaderError::MalformedHeaderLine {
                line: 1,
                mode: RecordMode::Single
            })
        ));
    }

    #[test]
    fn test_missing_signal_lines() {
        let err = parse_header("100 2 360\n100.dat 212\n").unwrap_err();
        assert!(matches!(
            err,
            HeaderError::InconsistentEntityCount {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_zero_nseg_is_fatal() {
        let err = parse_header("100/0 2 360\n").unwrap_err();
        assert!(matches!(err, HeaderError::InvalidSegmentCount(0)));
    }

    #[test]
    fn test_huge_declared_counts_report_missing_lines() {
        // Counts near the integer ceiling must surface as count mismatches,
        // not abort on preallocation.
        let err = parse_header("100 18446744073709551615\n").unwrap_err();
        assert!(matches!(
            err,
            HeaderError::InconsistentEntityCount { actual: 0, .. }
        ));

        let err = parse_header("m/9223372036854775807 1\n").unwrap_err();
        assert!(matches!(
            err,
            HeaderError::InconsistentEntityCount { actual: 0, .. }
        ));
    }

    #[test]
    fn test_nseg_one_is_multi_mode() {
        let header = parse_header("100/1 2 360\nseg_01 1000\n").unwrap();
        match header {
            Header::Multi(r) => {
                assert_eq!(r.n_seg, Some(1));
                assert_eq!(r.segments.len(), 1);
            }
            Header::Single(_) => panic!("expected multi-segment header"),
        }
    }
}
