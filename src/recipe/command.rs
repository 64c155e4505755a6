//! The fixed command table and typed command invocations.
//!
//! Each step of a GUI recipe is recorded under a command name; the table
//! below maps every recorded name (including the older `Action...` spellings
//! still found in circulating cookbooks) to its typed form and pulls in the
//! ingredients that command declares. An unknown name is a lookup failure
//! that propagates as a hard error; the table is closed.

use crate::error::GenerateError;
use crate::recipe::ingredient::{
    resolve_bands, resolve_scalar, resolve_segments, BandSelection, ScalarValue, SegmentSelection,
    COMMENT_PLACEHOLDER, MISSING,
};
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The operation behind a recorded command name, before ingredient
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Shake,
    Wiggle,
    LocalWiggle,
    Freeze,
    Unfreeze,
    SetSecondaryStructure,
    SetAminoAcid,
    Mutate,
    AddBands,
    DisableBands,
    EnableBands,
    RemoveBands,
    SetBandStrength,
    SetClashImportance,
    ResetPuzzle,
    RestoreAbsoluteBest,
    SaveRecentBest,
    RestoreRecentBest,
    Quicksave,
    Quickload,
    Comment,
}

fn command_table() -> &'static AHashMap<&'static str, CommandKind> {
    static TABLE: OnceLock<AHashMap<&'static str, CommandKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = AHashMap::new();
        table.insert("shake", CommandKind::Shake);
        table.insert("wiggle", CommandKind::Wiggle);
        table.insert("local_wiggle", CommandKind::LocalWiggle);
        table.insert("lock", CommandKind::Freeze);
        table.insert("unlock", CommandKind::Unfreeze);
        table.insert("set_secondary_structure", CommandKind::SetSecondaryStructure);
        table.insert("set_amino_acid", CommandKind::SetAminoAcid);
        table.insert("mutate", CommandKind::Mutate);
        table.insert("add_bands", CommandKind::AddBands);
        table.insert("disable", CommandKind::DisableBands);
        table.insert("enable", CommandKind::EnableBands);
        table.insert("remove", CommandKind::RemoveBands);
        table.insert("set_strength", CommandKind::SetBandStrength);
        table.insert("behavior", CommandKind::SetClashImportance);
        table.insert("ActionStandaloneResetPuzzle", CommandKind::ResetPuzzle);
        table.insert(
            "ActionStandaloneRestoreAbsoluteBest",
            CommandKind::RestoreAbsoluteBest,
        );
        table.insert(
            "ActionNoviceRestoreAbsoluteBest",
            CommandKind::RestoreAbsoluteBest,
        );
        table.insert("ActionStandaloneResetRecentBest", CommandKind::SaveRecentBest);
        table.insert("ActionNoviceResetRecentBest", CommandKind::SaveRecentBest);
        table.insert(
            "ActionStandaloneRestoreRecentBest",
            CommandKind::RestoreRecentBest,
        );
        table.insert("ActionNoviceRestoreRecentBest", CommandKind::RestoreRecentBest);
        table.insert("ActionStandaloneQuicksave", CommandKind::Quicksave);
        table.insert("ActionNoviceQuicksave", CommandKind::Quicksave);
        table.insert("ActionStandaloneQuickload", CommandKind::Quickload);
        table.insert("ActionNoviceQuickload", CommandKind::Quickload);
        table.insert("comment", CommandKind::Comment);
        table
    })
}

/// One fully resolved command invocation, ready for code generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Shake {
        iterations: ScalarValue,
    },
    Wiggle {
        iterations: ScalarValue,
    },
    LocalWiggle {
        iterations: ScalarValue,
        residues: SegmentSelection,
    },
    Freeze {
        residues: SegmentSelection,
    },
    Unfreeze {
        residues: SegmentSelection,
    },
    SetSecondaryStructure {
        residues: SegmentSelection,
        structure: ScalarValue,
    },
    SetAminoAcid {
        residues: SegmentSelection,
        aa: ScalarValue,
    },
    Mutate {
        iterations: ScalarValue,
        residues: SegmentSelection,
    },
    AddBands {
        residues1: SegmentSelection,
        residues2: SegmentSelection,
    },
    DisableBands {
        bands: BandSelection,
    },
    EnableBands {
        bands: BandSelection,
    },
    RemoveBands {
        bands: BandSelection,
    },
    SetBandStrength {
        bands: BandSelection,
        strength: ScalarValue,
    },
    SetClashImportance {
        importance: ScalarValue,
    },
    ResetPuzzle,
    RestoreAbsoluteBest,
    SaveRecentBest,
    RestoreRecentBest,
    Quicksave {
        slot: ScalarValue,
    },
    Quickload {
        slot: ScalarValue,
    },
    Comment {
        text: ScalarValue,
    },
}

fn scalar_arg(blob: &Map<String, Value>, key: &str) -> Result<ScalarValue, GenerateError> {
    match blob.get(key).and_then(Value::as_str) {
        Some(raw) => resolve_scalar(raw, MISSING),
        None => Ok(ScalarValue::undefined(MISSING)),
    }
}

fn segments_arg(blob: &Map<String, Value>, key: &str) -> Result<SegmentSelection, GenerateError> {
    match blob.get(key).and_then(Value::as_str) {
        Some(raw) => resolve_segments(raw, key),
        None => Ok(SegmentSelection::Undefined),
    }
}

fn bands_arg(blob: &Map<String, Value>, key: &str) -> Result<BandSelection, GenerateError> {
    match blob.get(key).and_then(Value::as_str) {
        Some(raw) => resolve_bands(raw, key),
        None => Ok(BandSelection::Undefined),
    }
}

impl Command {
    /// Looks up `name` in the fixed command table and resolves the declared
    /// ingredients out of the command blob.
    pub fn resolve(name: &str, blob: &Map<String, Value>) -> Result<Self, GenerateError> {
        let kind = command_table()
            .get(name)
            .copied()
            .ok_or_else(|| GenerateError::UnknownCommand {
                command: name.to_string(),
            })?;

        Ok(match kind {
            CommandKind::Shake => Command::Shake {
                iterations: scalar_arg(blob, "num_of_iterations")?,
            },
            CommandKind::Wiggle => Command::Wiggle {
                iterations: scalar_arg(blob, "num_of_iterations")?,
            },
            CommandKind::LocalWiggle => Command::LocalWiggle {
                iterations: scalar_arg(blob, "num_of_iterations")?,
                residues: segments_arg(blob, "residues")?,
            },
            CommandKind::Freeze => Command::Freeze {
                residues: segments_arg(blob, "residues")?,
            },
            CommandKind::Unfreeze => Command::Unfreeze {
                residues: segments_arg(blob, "residues")?,
            },
            CommandKind::SetSecondaryStructure => Command::SetSecondaryStructure {
                residues: segments_arg(blob, "residues")?,
                structure: scalar_arg(blob, "structure")?,
            },
            CommandKind::SetAminoAcid => Command::SetAminoAcid {
                residues: segments_arg(blob, "residues")?,
                aa: scalar_arg(blob, "aa")?,
            },
            CommandKind::Mutate => Command::Mutate {
                iterations: scalar_arg(blob, "num_of_iterations")?,
                residues: segments_arg(blob, "residues")?,
            },
            CommandKind::AddBands => Command::AddBands {
                residues1: segments_arg(blob, "residues1")?,
                residues2: segments_arg(blob, "residues2")?,
            },
            CommandKind::DisableBands => Command::DisableBands {
                bands: bands_arg(blob, "bands")?,
            },
            CommandKind::EnableBands => Command::EnableBands {
                bands: bands_arg(blob, "bands")?,
            },
            CommandKind::RemoveBands => Command::RemoveBands {
                bands: bands_arg(blob, "bands")?,
            },
            CommandKind::SetBandStrength => Command::SetBandStrength {
                bands: bands_arg(blob, "bands")?,
                strength: scalar_arg(blob, "strength")?,
            },
            CommandKind::SetClashImportance => Command::SetClashImportance {
                importance: scalar_arg(blob, "importance")?,
            },
            CommandKind::ResetPuzzle => Command::ResetPuzzle,
            CommandKind::RestoreAbsoluteBest => Command::RestoreAbsoluteBest,
            CommandKind::SaveRecentBest => Command::SaveRecentBest,
            CommandKind::RestoreRecentBest => Command::RestoreRecentBest,
            CommandKind::Quicksave => Command::Quicksave {
                slot: scalar_arg(blob, "slot")?,
            },
            CommandKind::Quickload => Command::Quickload {
                slot: scalar_arg(blob, "slot")?,
            },
            CommandKind::Comment => Command::Comment {
                text: match blob.get("comment").and_then(Value::as_str) {
                    Some(raw) => resolve_scalar(raw, COMMENT_PLACEHOLDER)?,
                    None => ScalarValue::undefined(COMMENT_PLACEHOLDER),
                },
            },
        })
    }

    /// Resolved ingredients as `(name, rendered value)` pairs, in declared
    /// order, for the detail-mode dump.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        match self {
            Command::Shake { iterations } | Command::Wiggle { iterations } => {
                vec![("num_of_iterations", iterations.to_string())]
            }
            Command::LocalWiggle {
                iterations,
                residues,
            }
            | Command::Mutate {
                iterations,
                residues,
            } => vec![
                ("num_of_iterations", iterations.to_string()),
                ("residues", residues.to_string()),
            ],
            Command::Freeze { residues } | Command::Unfreeze { residues } => {
                vec![("residues", residues.to_string())]
            }
            Command::SetSecondaryStructure {
                residues,
                structure,
            } => vec![
                ("residues", residues.to_string()),
                ("structure", structure.to_string()),
            ],
            Command::SetAminoAcid { residues, aa } => vec![
                ("residues", residues.to_string()),
                ("aa", aa.to_string()),
            ],
            Command::AddBands {
                residues1,
                residues2,
            } => vec![
                ("residues1", residues1.to_string()),
                ("residues2", residues2.to_string()),
            ],
            Command::DisableBands { bands }
            | Command::EnableBands { bands }
            | Command::RemoveBands { bands } => vec![("bands", bands.to_string())],
            Command::SetBandStrength { bands, strength } => vec![
                ("bands", bands.to_string()),
                ("strength", strength.to_string()),
            ],
            Command::SetClashImportance { importance } => {
                vec![("importance", importance.to_string())]
            }
            Command::ResetPuzzle
            | Command::RestoreAbsoluteBest
            | Command::SaveRecentBest
            | Command::RestoreRecentBest => Vec::new(),
            Command::Quicksave { slot } | Command::Quickload { slot } => {
                vec![("slot", slot.to_string())]
            }
            Command::Comment { text } => vec![("comment", text.to_string())],
        }
    }
}
