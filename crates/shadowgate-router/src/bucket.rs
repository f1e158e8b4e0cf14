// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-addressed traffic bucketing.
//!
//! A request's rows are written in a canonical JSON form (sorted keys, no
//! whitespace, ASCII-only escapes, shortest round-trip floats), hashed with
//! SHA-256, and the digest is reduced modulo 100. Identical content always
//! lands in the identical bucket, whatever order its keys were inserted in.
//!
//! The byte form matches Python's `json.dumps(rows, sort_keys=True,
//! separators=(",", ":"))`, so services written against either encoder agree
//! on every bucket.

use std::fmt::Write as _;

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use shadowgate_core::Bucket;

/// One feature record of a prediction request.
pub type Row = Map<String, Value>;

/// Stable bucket in `0..=99` for a request's rows.
pub fn compute_bucket(rows: &[Row]) -> Bucket {
    bucket_for_canonical(&canonical_rows(rows))
}

/// Stable bucket for an arbitrary JSON value.
pub fn compute_bucket_for_value(value: &Value) -> Bucket {
    bucket_for_canonical(&canonical_json(value))
}

/// SHA-256 of the canonical form, as lowercase hex. Useful for logging a
/// request's identity without logging its content.
pub fn content_digest_hex(rows: &[Row]) -> String {
    hex::encode(Sha256::digest(canonical_rows(rows).as_bytes()))
}

fn bucket_for_canonical(canonical: &str) -> Bucket {
    let digest = Sha256::digest(canonical.as_bytes());
    Bucket::from_residue(digest_mod(&digest, Bucket::COUNT))
}

/// The big-endian digest read as an unsigned integer, modulo `modulus`.
fn digest_mod(digest: &[u8], modulus: u8) -> u8 {
    let m = u32::from(modulus);
    let residue = digest
        .iter()
        .fold(0u32, |acc, &byte| (acc * 256 + u32::from(byte)) % m);
    residue as u8
}

/// Canonical JSON for a sequence of rows.
pub fn canonical_rows(rows: &[Row]) -> String {
    let mut out = String::new();
    out.push('[');
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_object(&mut out, row);
    }
    out.push(']');
    out
}

/// Canonical JSON for any value.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map),
    }
}

fn write_object(out: &mut String, map: &Map<String, Value>) {
    // Sorted explicitly: `Map` keeps insertion order when serde_json's
    // `preserve_order` feature is enabled anywhere in the build.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}

/// Integers are written from their literal text (`arbitrary_precision` keeps
/// every digit), with `-0` folded to `0`. Everything else is a float.
fn write_number(out: &mut String, n: &Number) {
    let text = n.to_string();
    if is_integer_literal(&text) {
        let digits = text.strip_prefix('-').unwrap_or(&text);
        if digits.bytes().all(|b| b == b'0') {
            out.push('0');
        } else {
            out.push_str(&text);
        }
    } else if let Some(f) = n.as_f64() {
        write_float(out, f);
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Shortest round-trip float, laid out the way Python's `repr` does:
/// positional for decimal exponents in `-4..16`, otherwise `d.ddde±XX`.
/// Integral values keep a trailing `.0`.
fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
        return;
    }
    if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }

    if f.is_sign_negative() {
        out.push('-');
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.2345e2`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        let point = exp + 1;
        if point <= 0 {
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
            out.push_str(&digits);
        } else {
            let point = point as usize;
            if digits.len() <= point {
                out.push_str(&digits);
                out.extend(std::iter::repeat_n('0', point - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..point]);
                out.push('.');
                out.push_str(&digits[point..]);
            }
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "e{sign}{:02}", exp.unsigned_abs());
    }
}

/// JSON string with every non-ASCII character escaped as `\uXXXX`
/// (surrogate pairs above the BMP).
fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out.push('"');
}
