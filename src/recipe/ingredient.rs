//! Normalized, typed ingredient descriptors.
//!
//! Each command argument arrives as a spirit-formatted blob whose `name` tag
//! identifies its kind. Resolution turns the blob into a closed descriptor so
//! generation can dispatch with an exhaustive match instead of a string table.
//! Resolution never fails for a recognized tag; anything the source marks
//! undefined (or omits outright) degrades to a sentinel that the generator
//! surfaces as an inline diagnostic.

use crate::error::GenerateError;
use crate::spirit::from_spirit;
use serde_json::{Map, Value};
use std::fmt;

/// Sentinel substituted for any ingredient value the source marks undefined.
pub const MISSING: &str = "-1";

/// Placeholder for an undefined freeform comment.
pub const COMMENT_PLACEHOLDER: &str = "(TODO: add comment here)";

/// A selection of structural segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSelection {
    /// Every segment.
    All,
    /// Every `step`-th segment from a starting point.
    ByStride { start: StrideStart, step: String },
    /// A user pick, resolved interactively at script run time.
    Reference { ref_id: String },
    /// The recording never filled the selection in.
    Undefined,
}

/// Where a stride starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrideStart {
    /// A literal segment index; sentinel `-1` when the index was undefined.
    Index(String),
    /// A user-pick reference id.
    Reference(String),
}

/// A selection of bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandSelection {
    All,
    /// Bands "connected" in the recording, which actually meant spacebands.
    Connected,
    Reference { ref_id: String },
    Undefined,
}

/// A plain scalar ingredient with its definedness preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarValue {
    pub defined: bool,
    pub value: String,
}

impl ScalarValue {
    pub fn undefined(placeholder: &str) -> Self {
        Self {
            defined: false,
            value: placeholder.to_string(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "{}", self.value)
        } else {
            write!(f, "undefined ({})", self.value)
        }
    }
}

impl fmt::Display for StrideStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrideStart::Index(v) => write!(f, "index {}", v),
            StrideStart::Reference(v) => write!(f, "reference {}", v),
        }
    }
}

impl fmt::Display for SegmentSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentSelection::All => write!(f, "all"),
            SegmentSelection::ByStride { start, step } => {
                write!(f, "by_stride ( start = {}, step = {} )", start, step)
            }
            SegmentSelection::Reference { ref_id } => write!(f, "reference {}", ref_id),
            SegmentSelection::Undefined => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for BandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandSelection::All => write!(f, "all"),
            BandSelection::Connected => write!(f, "connected"),
            BandSelection::Reference { ref_id } => write!(f, "reference {}", ref_id),
            BandSelection::Undefined => write!(f, "undefined"),
        }
    }
}

fn str_field<'a>(blob: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    blob.get(key).and_then(Value::as_str)
}

/// Reads a nested spirit blob stored as a string field.
fn spirit_field(
    blob: &Map<String, Value>,
    key: &str,
) -> Result<Option<Map<String, Value>>, GenerateError> {
    match str_field(blob, key) {
        Some(raw) => Ok(Some(from_spirit(raw)?)),
        None => Ok(None),
    }
}

/// Reads an `is_defined`/`value` pair, substituting `placeholder` for
/// anything not marked defined.
fn defined_value(blob: &Map<String, Value>, placeholder: &str) -> ScalarValue {
    if str_field(blob, "is_defined") == Some("1") {
        if let Some(value) = str_field(blob, "value") {
            return ScalarValue {
                defined: true,
                value: value.to_string(),
            };
        }
    }
    ScalarValue::undefined(placeholder)
}

/// Resolves a scalar ingredient blob (iteration counts, codes, slots, ...).
pub fn resolve_scalar(raw: &str, placeholder: &str) -> Result<ScalarValue, GenerateError> {
    let blob = from_spirit(raw)?;
    Ok(defined_value(&blob, placeholder))
}

/// Resolves a segment-selection ingredient blob by its `name` tag.
pub fn resolve_segments(raw: &str, ingredient: &str) -> Result<SegmentSelection, GenerateError> {
    let blob = from_spirit(raw)?;
    let tag = str_field(&blob, "name").unwrap_or_default();
    match tag {
        "residues_all" => Ok(SegmentSelection::All),
        "residues_by_stride" => {
            let start = match spirit_field(&blob, "start")? {
                Some(start_blob) => resolve_stride_start(&start_blob, ingredient)?,
                None => StrideStart::Index(MISSING.to_string()),
            };
            let step = match spirit_field(&blob, "step")? {
                Some(step_blob) => defined_value(&step_blob, MISSING).value,
                None => MISSING.to_string(),
            };
            Ok(SegmentSelection::ByStride { start, step })
        }
        "residues_ref" => Ok(SegmentSelection::Reference {
            ref_id: str_field(&blob, "ref-id").unwrap_or(MISSING).to_string(),
        }),
        "residues_undefined" => Ok(SegmentSelection::Undefined),
        other => Err(GenerateError::UnknownSelectionTag {
            ingredient: ingredient.to_string(),
            tag: other.to_string(),
        }),
    }
}

fn resolve_stride_start(
    start: &Map<String, Value>,
    ingredient: &str,
) -> Result<StrideStart, GenerateError> {
    let tag = str_field(start, "name").unwrap_or_default();
    match tag {
        "single_residue_by_index" => {
            let index = match spirit_field(start, "index")? {
                Some(index_blob) => defined_value(&index_blob, MISSING).value,
                None => MISSING.to_string(),
            };
            Ok(StrideStart::Index(index))
        }
        "residues_ref" => Ok(StrideStart::Reference(
            str_field(start, "ref-id").unwrap_or(MISSING).to_string(),
        )),
        other => Err(GenerateError::UnknownSelectionTag {
            ingredient: ingredient.to_string(),
            tag: other.to_string(),
        }),
    }
}

/// Resolves a band-selection ingredient blob by its `name` tag.
pub fn resolve_bands(raw: &str, ingredient: &str) -> Result<BandSelection, GenerateError> {
    let blob = from_spirit(raw)?;
    let tag = str_field(&blob, "name").unwrap_or_default();
    match tag {
        "bands_all" => Ok(BandSelection::All),
        "bands_connected" => Ok(BandSelection::Connected),
        "bands_reference" => Ok(BandSelection::Reference {
            ref_id: str_field(&blob, "ref-id").unwrap_or(MISSING).to_string(),
        }),
        "bands_undefined" => Ok(BandSelection::Undefined),
        other => Err(GenerateError::UnknownSelectionTag {
            ingredient: ingredient.to_string(),
            tag: other.to_string(),
        }),
    }
}
