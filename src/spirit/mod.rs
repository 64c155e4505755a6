//! Reader for the "JSON Spirit" cookbook serialization.
//!
//! Foldit cookbook files store structured data in a JSON dialect that omits
//! the commas between sibling key-value pairs. The repair performed here is
//! purely line-oriented: restore the separators, hand the result to a strict
//! parser, and report any remaining failure with enough context to locate it
//! in the source.

use crate::error::SpiritError;
use serde_json::{Map, Value};

pub mod stream;

/// Restores the separators a strict parser expects.
///
/// Lines beginning with `{` or `}` are structural and dropped; every other
/// line is a key-value pair, joined to its successor with a comma. The whole
/// block is wrapped in a synthetic enclosing object.
///
/// A value that itself contains a literal line starting with `{` or `}` will
/// corrupt the repair. That fragility is inherent to the source format.
pub fn restore_commas(spirit: &str) -> String {
    let pairs: Vec<&str> = spirit
        .lines()
        .filter(|line| !line.starts_with('{') && !line.starts_with('}'))
        .collect();
    format!("{{\n{}\n}}\n", pairs.join(",\n"))
}

/// Repairs a spirit-formatted block and parses it into a key-value map.
///
/// The values in the map may themselves be spirit-formatted blocks in need
/// of another pass; the ingredient resolver applies this recursively.
pub fn from_spirit(spirit: &str) -> Result<Map<String, Value>, SpiritError> {
    parse_strict(&restore_commas(spirit))
}

/// Parses standard JSON into a key-value map, converting any failure into a
/// [`SpiritError::Decode`] carrying the offending text, the character offset
/// of the failure, and a ten-character context window on either side.
pub fn parse_strict(doc: &str) -> Result<Map<String, Value>, SpiritError> {
    match serde_json::from_str::<Value>(doc) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(decode_error_at(doc, 0, format!("expected an object, found {}", other))),
        Err(err) => {
            let offset = offset_of(doc, err.line(), err.column());
            Err(decode_error_at(doc, offset, err.to_string()))
        }
    }
}

/// Converts serde_json's one-based line/column pair into an offset.
fn offset_of(doc: &str, line: usize, column: usize) -> usize {
    let preceding: usize = doc
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (preceding + column.saturating_sub(1)).min(doc.len())
}

fn decode_error_at(doc: &str, offset: usize, message: String) -> SpiritError {
    let mut start = offset.saturating_sub(10);
    while start > 0 && !doc.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + 10).min(doc.len());
    while end < doc.len() && !doc.is_char_boundary(end) {
        end += 1;
    }
    SpiritError::Decode {
        message,
        offset,
        context: doc[start..end].to_string(),
        context_start: start,
        context_end: end,
        text: doc.to_string(),
    }
}
