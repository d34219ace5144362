// src/parser/signal_line.rs
//! Tokenizer for signal lines:
//! `filename fmt[xsampsperframe][:skew][+byteoffset]
//!  [adcgain[(baseline)][/units]] [adcres] [adczero] [initvalue]
//!  [checksum] [blocksize] [signame]`
//!
//! Empty optional sub-tokens fall through to the channel default rules; only
//! non-empty non-numeric tokens in numeric positions become type errors.

use crate::error::Result;
use crate::parser::{malformed, parse_float, parse_int, parse_uint};
use crate::record::SignalSpec;
use crate::types::RecordMode;

pub(crate) fn parse(line: &str, index: usize, line_no: usize) -> Result<SignalSpec> {
    let mode = RecordMode::Single;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 9 {
        return Err(malformed(line_no, mode));
    }

    let file_name = tokens[0];
    if file_name.is_empty() || !file_name.chars().all(is_filename_char) {
        return Err(malformed(line_no, mode));
    }

    let fmt_group = parse_fmt_token(tokens[1], line_no)?;

    let (adc_gain, baseline, units) = match tokens.get(2) {
        Some(tok) => parse_gain_token(tok, line_no)?,
        None => (None, None, None),
    };

    let adc_res = match tokens.get(3) {
        Some(tok) => Some(parse_uint(tok, "adcres")?),
        None => None,
    };
    let adc_zero = match tokens.get(4) {
        Some(tok) => Some(parse_int(tok, "adczero")?),
        None => None,
    };
    let init_value = match tokens.get(5) {
        Some(tok) => Some(parse_int(tok, "initvalue")?),
        None => None,
    };
    let checksum = match tokens.get(6) {
        Some(tok) => Some(parse_int(tok, "checksum")?),
        None => None,
    };
    let block_size = match tokens.get(7) {
        Some(tok) => Some(parse_uint(tok, "blocksize")?),
        None => None,
    };
    let sig_name = tokens.get(8).map(|t| t.to_string());

    let mut signal = SignalSpec {
        file_name: Some(file_name.to_string()),
        fmt: Some(fmt_group.fmt),
        samps_per_frame: fmt_group.samps_per_frame,
        skew: fmt_group.skew,
        byte_offset: fmt_group.byte_offset,
        adc_gain,
        baseline,
        units,
        adc_res,
        adc_zero,
        init_value,
        checksum,
        block_size,
        sig_name,
    };
    signal.fill_channel_defaults(index);
    Ok(signal)
}

struct FmtGroup {
    fmt: String,
    samps_per_frame: Option<u32>,
    skew: Option<u32>,
    byte_offset: Option<u64>,
}

/// `fmt[xsampsperframe][:skew][+byteoffset]`, sub-fields in that fixed order.
fn parse_fmt_token(token: &str, line_no: usize) -> Result<FmtGroup> {
    let (fmt, mut rest) = take_digits(token);
    if fmt.is_empty() {
        return Err(crate::error::HeaderError::InvalidFieldType {
            field: "fmt".to_string(),
            expected: "integer".to_string(),
            actual: token.to_string(),
        });
    }

    let mut group = FmtGroup {
        fmt: fmt.to_string(),
        samps_per_frame: None,
        skew: None,
        byte_offset: None,
    };

    if let Some(tail) = rest.strip_prefix('x') {
        let (digits, after) = take_digits(tail);
        if digits.is_empty() {
            return Err(malformed(line_no, RecordMode::Single));
        }
        group.samps_per_frame = Some(parse_uint(digits, "sampsperframe")?);
        rest = after;
    }
    if let Some(tail) = rest.strip_prefix(':') {
        let (digits, after) = take_digits(tail);
        if digits.is_empty() {
            return Err(malformed(line_no, RecordMode::Single));
        }
        group.skew = Some(parse_uint(digits, "skew")?);
        rest = after;
    }
    if let Some(tail) = rest.strip_prefix('+') {
        let (digits, after) = take_digits(tail);
        if digits.is_empty() {
            return Err(malformed(line_no, RecordMode::Single));
        }
        group.byte_offset = Some(parse_uint(digits, "byteoffset")?);
        rest = after;
    }
    if !rest.is_empty() {
        return Err(malformed(line_no, RecordMode::Single));
    }
    Ok(group)
}

/// `adcgain[(baseline)][/units]`. An empty gain sub-token is legal (defaults
/// apply); an empty baseline or units sub-token after its delimiter is not.
fn parse_gain_token(
    token: &str,
    line_no: usize,
) -> Result<(Option<f64>, Option<i64>, Option<String>)> {
    let mode = RecordMode::Single;

    if let Some((gain_tok, tail)) = token.split_once('(') {
        let (baseline_tok, after) = tail.split_once(')').ok_or_else(|| malformed(line_no, mode))?;
        if baseline_tok.is_empty() {
            return Err(malformed(line_no, mode));
        }
        let gain = if gain_tok.is_empty() {
            None
        } else {
            Some(parse_float(gain_tok, "adcgain")?)
        };
        let baseline = Some(parse_int(baseline_tok, "baseline")?);
        let units = match after.strip_prefix('/') {
            Some(u) if !u.is_empty() && u.chars().all(is_units_char) => Some(u.to_string()),
            Some(_) => return Err(malformed(line_no, mode)),
            None if after.is_empty() => None,
            None => return Err(malformed(line_no, mode)),
        };
        return Ok((gain, baseline, units));
    }

    if let Some((gain_tok, units_tok)) = token.split_once('/') {
        if units_tok.is_empty() || !units_tok.chars().all(is_units_char) {
            return Err(malformed(line_no, mode));
        }
        let gain = if gain_tok.is_empty() {
            None
        } else {
            Some(parse_float(gain_tok, "adcgain")?)
        };
        return Ok((gain, None, Some(units_tok.to_string())));
    }

    Ok((Some(parse_float(token, "adcgain")?), None, None))
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

fn is_filename_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '~' || c == '-'
}

fn is_units_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '^' || c == '/' || c == '-' || c == '%'
}
