// src/parser/record_line.rs
//! Tokenizer for the record line:
//! `name[/nseg] nsig [fs[/counterfreq[(basecounter)]]] [siglen] [basetime] [basedate]`

use crate::error::Result;
use crate::parser::{malformed, parse_float, parse_int, parse_uint};
use crate::record::DEFAULT_FS;
use crate::types::RecordMode;

#[derive(Debug)]
pub(crate) struct RecordLine {
    pub name: String,
    pub n_seg: Option<i64>,
    pub n_sig: usize,
    /// Already default-substituted: 250 when the line omits it.
    pub fs: f64,
    pub counter_freq: Option<f64>,
    pub base_counter: Option<f64>,
    pub sig_len: Option<u64>,
    pub base_time: Option<String>,
    pub base_date: Option<String>,
}

pub(crate) fn parse(line: &str, line_no: usize) -> Result<RecordLine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // Mode is known as soon as the first token is, and colors every error
    // reported from this line onward.
    let mode = match tokens.first() {
        Some(tok) if tok.contains('/') => RecordMode::Multi,
        _ => RecordMode::Single,
    };
    if tokens.len() < 2 || tokens.len() > 6 {
        return Err(malformed(line_no, mode));
    }

    let (name, n_seg) = match tokens[0].split_once('/') {
        Some((name, nseg_tok)) => {
            if nseg_tok.is_empty() {
                return Err(malformed(line_no, mode));
            }
            (name, Some(parse_int(nseg_tok, "nseg")?))
        }
        None => (tokens[0], None),
    };
    if name.is_empty() || !name.chars().all(is_name_char) {
        return Err(malformed(line_no, mode));
    }

    let n_sig: usize = parse_uint(tokens[1], "nsig")?;

    let (fs, counter_freq, base_counter) = match tokens.get(2) {
        Some(tok) => parse_fs_token(tok, line_no, mode)?,
        None => (None, None, None),
    };

    let sig_len = match tokens.get(3) {
        Some(tok) => Some(parse_uint(tok, "siglen")?),
        None => None,
    };

    Ok(RecordLine {
        name: name.to_string(),
        n_seg,
        n_sig,
        fs: fs.unwrap_or(DEFAULT_FS),
        counter_freq,
        base_counter,
        sig_len,
        base_time: tokens.get(4).map(|t| t.to_string()),
        base_date: tokens.get(5).map(|t| t.to_string()),
    })
}

/// `fs[/counterfreq[(basecounter)]]`; an empty `fs` sub-token is legal and
/// falls through to default substitution.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn parse_fs_token(
    token: &str,
    line_no: usize,
    mode: RecordMode,
) -> Result<(Option<f64>, Option<f64>, Option<f64>)> {
    let (fs_tok, rest) = match token.split_once('/') {
        Some((fs, rest)) => (fs, Some(rest)),
        None => (token, None),
    };
    let fs = if fs_tok.is_empty() {
        None
    } else {
        Some(parse_float(fs_tok, "fs")?)
    };

    let (counter_freq, base_counter) = match rest {
        None => (None, None),
        Some(rest) => match rest.split_once('(') {
            Some((cf_tok, tail)) => {
                let bc_tok = tail.strip_suffix(')').ok_or_else(|| malformed(line_no, mode))?;
                if cf_tok.is_empty() || bc_tok.is_empty() {
                    return Err(malformed(line_no, mode));
                }
                (
                    Some(parse_float(cf_tok, "counterfreq")?),
                    Some(parse_float(bc_tok, "basecounter")?),
                )
            }
            None => {
                if rest.is_empty() {
                    return Err(malformed(line_no, mode));
                }
                (Some(parse_float(rest, "counterfreq")?), None)
            }
        },
    };
    Ok((fs, counter_freq, base_counter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeaderError;

    #[test]
    fn test_basic_record_line() {
        let rec = parse("100 2 180 650000", 1).unwrap();
        assert_eq!(rec.name, "100");
        assert_eq!(rec.n_seg, None);
        assert_eq!(rec.n_sig, 2);
        assert_eq!(rec.fs, 180.0);
        assert_eq!(rec.sig_len, Some(650000));
        assert_eq!(rec.base_time, None);
        assert_eq!(rec.base_date, None);
    }

    #[test]
    fn test_fs_defaults_to_250() {
        let rec = parse("100 2", 1).unwrap();
        assert_eq!(rec.fs, 250.0);
        assert_eq!(rec.sig_len, None);
    }

    #[test]
    fn test_counter_frequency_and_base_counter() {
        let rec = parse("100 2 360/60(10.5) 1000", 1).unwrap();
        assert_eq!(rec.fs, 360.0);
        assert_eq!(rec.counter_freq, Some(60.0));
        assert_eq!(rec.base_counter, Some(10.5));
        assert_eq!(rec.sig_len, Some(1000));
    }

    #[test]
    fn test_nseg_parsed_from_name_token() {
        let rec = parse("mit100/3 2 360", 1).unwrap();
        assert_eq!(rec.name, "mit100");
        assert_eq!(rec.n_seg, Some(3));
    }

    #[test]
    fn test_dotted_and_dashed_record_names() {
        // Record names may carry dots and dashes; the written header for such
        // a name must tokenize back.
        let rec = parse("rec.v2 1 360", 1).unwrap();
        assert_eq!(rec.name, "rec.v2");

        let rec = parse("mit-100 1 360", 1).unwrap();
        assert_eq!(rec.name, "mit-100");
    }

    #[test]
    fn test_base_time_and_date() {
        let rec = parse("100 2 360 650000 0:10:30 01/01/2001", 1).unwrap();
        assert_eq!(rec.base_time.as_deref(), Some("0:10:30"));
        assert_eq!(rec.base_date.as_deref(), Some("01/01/2001"));
    }

    #[test]
    fn test_non_numeric_nsig_is_type_error() {
        let err = parse("100 two", 1).unwrap_err();
        assert!(matches!(
            err,
            HeaderError::InvalidFieldType { field, .. } if field == "nsig"
        ));
    }

    #[test]
    fn test_lone_token_is_malformed() {
        assert!(matches!(
            parse("100", 4),
            Err(HeaderError::MalformedHeaderLine {
                line: 4,
                mode: RecordMode::Single
            })
        ));
    }

    #[test]
    fn test_empty_nseg_is_malformed() {
        assert!(matches!(
            parse("100/ 2", 1),
            Err(HeaderError::MalformedHeaderLine {
                mode: RecordMode::Multi,
                ..
            })
        ));
    }
}
