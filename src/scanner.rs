//! The batch driver: one pass over a cookbook stream.
//!
//! Splitting, normalization, resolution and generation run strictly in
//! order, one record at a time. A record that fails to decode is reported
//! and skipped; the stream carries on. Statistics accumulate in a value the
//! caller gets back, and the per-recipe listing goes to a caller-supplied
//! report stream, so the library itself stays silent.

use crate::codegen::GenContext;
use crate::error::{GenerateError, ScanError, SpiritError};
use crate::output::RecipeSink;
use crate::recipe::{
    Command, RecipeKind, RecipeRecord, GUI_HEADER_ATTRS, SCRIPT_HEADER_ATTRS,
};
use crate::spirit::from_spirit;
use crate::spirit::stream::{LineRecord, RecordSplitter};
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};
use std::sync::OnceLock;

const SEPARATOR: &str =
    "=========================================================================";

/// What to process and how much to say about it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Generate Lua for GUI recipes.
    pub gui: bool,
    /// Include per-command ingredient dumps as comments in GUI output.
    pub detail: bool,
    /// Pass through scripts recorded against interface version 1.
    pub lua_v1: bool,
    /// Pass through scripts recorded against interface version 2.
    pub lua_v2: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            gui: true,
            detail: false,
            lua_v1: false,
            lua_v2: false,
        }
    }
}

/// One recoverable decode failure, kept for the caller's diagnostics.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DecodeDiagnostic {
    pub message: String,
    pub offset: usize,
    pub context: String,
}

/// Run-level statistics, accumulated through the pass and returned to the
/// caller.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub records_read: u64,
    pub gui_recipes: u64,
    pub gui_skipped: u64,
    pub script_recipes: u64,
    pub v1_skipped: u64,
    pub v2_skipped: u64,
    pub decode_errors: Vec<DecodeDiagnostic>,
    /// True once the stream was recognized as the single-record format.
    pub accumulate_format: bool,
}

impl RunStats {
    pub fn decode_error_count(&self) -> usize {
        self.decode_errors.len()
    }
}

/// Derives the output file name from a recipe name: surrounding whitespace
/// trimmed, spaces become underscores, anything outside letters, digits,
/// `-`, `_` and `.` is stripped.
pub fn lua_file_name(name: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^-\w.]").expect("file pattern is a valid literal"));
    let cleaned = name.trim().replace(' ', "_");
    format!("{}.lua", re.replace_all(&cleaned, ""))
}

/// Drives the pipeline over one cookbook stream.
#[derive(Debug, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Processes the whole stream: recipes go to `sink`, the per-recipe
    /// listing and decode reports go to `report`, and the run statistics
    /// come back as the result.
    ///
    /// An I/O or encoding failure on `reader` or either output aborts the
    /// remainder of the run; a bad record only costs that record.
    pub fn scan<R, S, W>(
        &self,
        reader: R,
        sink: &mut S,
        report: &mut W,
    ) -> Result<RunStats, ScanError>
    where
        R: BufRead,
        S: RecipeSink + ?Sized,
        W: Write + ?Sized,
    {
        let mut splitter = RecordSplitter::new();
        let mut stats = RunStats::default();

        for line in reader.lines() {
            let line = line?;
            match splitter.push_line(&line) {
                Ok(LineRecord::Structural) => {}
                Ok(LineRecord::Record(map)) => {
                    stats.records_read += 1;
                    self.process_record_map(map, sink, report, &mut stats)?;
                }
                Ok(LineRecord::Accumulated) => {
                    stats.records_read += 1;
                    if !stats.accumulate_format {
                        stats.accumulate_format = true;
                        writeln!(report, "single.macro format")?;
                    }
                }
                Err(err) => {
                    stats.records_read += 1;
                    report_decode_error(report, &err, &mut stats)?;
                }
            }
        }

        // The single-record format only materializes at end of stream.
        if let Some(accumulated) = splitter.finish() {
            let record = RecipeRecord::normalize(accumulated);
            self.dispatch_recipe(&record, sink, report, &mut stats)?;
        }

        Ok(stats)
    }

    /// One parsed line holds one or more `name -> spirit blob` pairs; each
    /// decodes into an independent recipe. A bad blob skips the rest of the
    /// line's pairs, matching the per-line recovery granularity.
    fn process_record_map<S, W>(
        &self,
        map: Map<String, Value>,
        sink: &mut S,
        report: &mut W,
        stats: &mut RunStats,
    ) -> Result<(), ScanError>
    where
        S: RecipeSink + ?Sized,
        W: Write + ?Sized,
    {
        for (_name, value) in map {
            let blob = match &value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            match from_spirit(&blob) {
                Ok(fields) => {
                    let record = RecipeRecord::normalize(fields);
                    self.dispatch_recipe(&record, sink, report, stats)?;
                }
                Err(err) => {
                    report_decode_error(report, &err, stats)?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn dispatch_recipe<S, W>(
        &self,
        record: &RecipeRecord,
        sink: &mut S,
        report: &mut W,
        stats: &mut RunStats,
    ) -> Result<(), ScanError>
    where
        S: RecipeSink + ?Sized,
        W: Write + ?Sized,
    {
        writeln!(report, "{}", SEPARATOR)?;
        writeln!(
            report,
            "recipe = \"{}\", type = \"{}\"",
            record.name(),
            record.attr_display("type", "gui")
        )?;
        writeln!(report, "description = \"{}\"", record.desc())?;

        match record.kind() {
            RecipeKind::Gui => {
                stats.gui_recipes += 1;
                if self.options.gui {
                    match self.generate_gui(record) {
                        Ok(text) => {
                            sink.write_recipe(&lua_file_name(record.name()), &text)?;
                        }
                        // A command blob that fails to decode costs this
                        // recipe, not the run.
                        Err(GenerateError::Spirit(err)) => {
                            report_decode_error(report, &err, stats)?;
                        }
                        Err(hard) => return Err(hard.into()),
                    }
                } else {
                    stats.gui_skipped += 1;
                    writeln!(report, "recipe skipped")?;
                }
            }
            RecipeKind::Script => {
                stats.script_recipes += 1;
                let version = record.attr_display("script_version", "0");
                let wanted = (self.options.lua_v1 && version == "1")
                    || (self.options.lua_v2 && version == "2");
                if wanted {
                    sink.write_recipe(&lua_file_name(record.name()), &script_text(record))?;
                } else {
                    writeln!(report, "recipe skipped")?;
                    if version == "1" {
                        stats.v1_skipped += 1;
                    }
                    if version == "2" {
                        stats.v2_skipped += 1;
                    }
                }
            }
            RecipeKind::Other => {}
        }
        Ok(())
    }

    /// Generates the Lua text for one GUI recipe: attribute header first,
    /// then each command slot in recorded order.
    fn generate_gui(&self, record: &RecipeRecord) -> Result<String, GenerateError> {
        let mut ctx = GenContext::new();
        write_header(&mut ctx.out, record, GUI_HEADER_ATTRS);

        for index in 0..record.size() {
            let blob = record
                .command_blob(index)
                .ok_or(GenerateError::MissingCommandSlot { index })?;
            let cmdobj = from_spirit(blob)?;
            let name = cmdobj
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default();

            if self.options.detail {
                let args = cmdobj.keys().filter(|key| *key != "name").join(", ");
                ctx.line(&format!("--  command {} = {} ({})", index + 1, name, args));
            }

            let command = Command::resolve(name, &cmdobj)?;

            if self.options.detail {
                for (arg, rendered) in command.describe() {
                    ctx.line(&format!("--  {} = {}", arg, rendered));
                }
            }

            ctx.emit(&command)?;
        }

        Ok(ctx.into_output())
    }
}

/// The pass-through text of a script recipe: header plus the verbatim body.
fn script_text(record: &RecipeRecord) -> String {
    let mut text = String::new();
    write_header(&mut text, record, SCRIPT_HEADER_ATTRS);
    if let Some(body) = record.attr("script") {
        text.push_str(body);
        text.push('\n');
    }
    text
}

/// The block-comment attribute header opening every generated file.
fn write_header(out: &mut String, record: &RecipeRecord, attrs: &[&str]) {
    out.push_str("--[[\n\n");
    for attr in attrs {
        out.push_str(&format!("    {} = {}\n", attr, record.attr_display(attr, "0")));
    }
    out.push_str("\n]]--\n");
}

fn report_decode_error<W>(
    report: &mut W,
    err: &SpiritError,
    stats: &mut RunStats,
) -> Result<(), ScanError>
where
    W: Write + ?Sized,
{
    let SpiritError::Decode {
        message,
        offset,
        context,
        context_start,
        context_end,
        text,
    } = err;
    writeln!(report, "JSON decode error: {}", message)?;
    writeln!(report, "error position {}", offset)?;
    if let Some(character) = text.get(*offset..).and_then(|rest| rest.chars().next()) {
        writeln!(report, "error character = \"{}\"", character)?;
    }
    writeln!(
        report,
        "error context = \"{}\" [ {}:{} ]",
        context, context_start, context_end
    )?;
    stats.decode_errors.push(DecodeDiagnostic {
        message: message.clone(),
        offset: *offset,
        context: context.clone(),
    });
    Ok(())
}
