//! Splitting a cookbook stream into independent top-level records.
//!
//! An `all.macro` file carries one recipe per physical line, wrapped in a
//! structural outer object. A `single.macro` file instead spreads the fields
//! of one recipe across many lines; that layout is detected from the first
//! parsed record and every later line is merged into a single accumulated
//! record emitted at end of stream.

use crate::error::SpiritError;
use crate::spirit::parse_strict;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The cookbook escapes `,` and `#` with backslashes, which strict JSON does
/// not accept. The whole backslash run is dropped, keeping the character.
fn escape_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\\+)([#,])").expect("escape pattern is a valid literal"))
}

/// What one pushed line turned out to be.
#[derive(Debug)]
pub enum LineRecord {
    /// A structural line (`version`, `verify`, or a brace); nothing to do.
    Structural,
    /// One complete top-level record.
    Record(Map<String, Value>),
    /// The line was merged into the running single-record accumulation.
    Accumulated,
}

/// Splits raw cookbook lines into records, detecting the accumulate format.
#[derive(Debug, Default)]
pub struct RecordSplitter {
    saw_record: bool,
    accumulating: bool,
    accumulated: Map<String, Value>,
}

impl RecordSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the stream has been recognized as the single-record format.
    pub fn is_accumulate_format(&self) -> bool {
        self.accumulating
    }

    /// Consumes one physical line of the stream.
    ///
    /// Candidate lines are wrapped in a synthetic enclosing object and
    /// de-escaped before the strict parse. A parse failure surfaces the
    /// decode diagnostics; the caller decides whether to continue.
    pub fn push_line(&mut self, line: &str) -> Result<LineRecord, SpiritError> {
        if line.starts_with("version")
            || line.starts_with("verify")
            || line.starts_with('{')
            || line.starts_with('}')
        {
            return Ok(LineRecord::Structural);
        }

        let wrapped = format!("{{\n{}}}\n", line);
        let descaped = escape_pattern().replace_all(&wrapped, "$2");
        let record = parse_strict(&descaped)?;

        // The single.macro layout is recognized by its first command slot
        // appearing as a top-level key of the first record.
        if !self.saw_record {
            self.saw_record = true;
            if record.contains_key("action-0") {
                self.accumulating = true;
            }
        }

        if self.accumulating {
            for (key, value) in record {
                self.accumulated.insert(key, value);
            }
            Ok(LineRecord::Accumulated)
        } else {
            Ok(LineRecord::Record(record))
        }
    }

    /// Hands back the accumulated single record, if the stream was in that
    /// format and produced any fields at all.
    pub fn finish(self) -> Option<Map<String, Value>> {
        if self.accumulating && !self.accumulated.is_empty() {
            Some(self.accumulated)
        } else {
            None
        }
    }
}
