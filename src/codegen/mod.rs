//! Lua code generation for resolved commands.
//!
//! Every generator appends to the per-recipe [`GenContext`] and nothing
//! else: the output buffer and the two user-pick tables travel together
//! through one recipe's generation pass and are discarded afterwards.
//!
//! Missing ingredient values never stop generation. The sentinel is inlined
//! and an adjacent `TODO` comment tells the recipe author what to fill in,
//! so the emitted script is always syntactically complete.

use crate::error::GenerateError;
use crate::recipe::{Command, ScalarValue, MISSING};

mod bands;
pub mod picks;
mod segments;

pub use picks::PickTable;

/// Per-recipe generation state: the output buffer plus the lazily declared
/// segment-pick and band-pick tables.
#[derive(Debug)]
pub struct GenContext {
    pub out: String,
    pub seg_picks: PickTable,
    pub band_picks: PickTable,
}

impl Default for GenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GenContext {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            seg_picks: PickTable::segments(),
            band_picks: PickTable::bands(),
        }
    }

    pub fn into_output(self) -> String {
        self.out
    }

    pub(crate) fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(crate) fn todo(&mut self, text: &str) {
        self.line(&format!("--  TODO: {}", text));
    }

    /// Declares or reuses the segment pick for `ref_id`, returning its name.
    pub(crate) fn seg_pick(&mut self, ref_id: &str) -> String {
        self.seg_picks.declare_or_reuse(&mut self.out, ref_id)
    }

    /// Declares or reuses the band pick for `ref_id`, returning its name.
    pub(crate) fn band_pick(&mut self, ref_id: &str) -> String {
        self.band_picks.declare_or_reuse(&mut self.out, ref_id)
    }

    /// Iteration counts get two special sentinels: `-1` marks a value the
    /// recording left out, `0` means "run until stopped" in the source tool.
    pub(crate) fn check_iterations(&mut self, iterations: &ScalarValue) -> String {
        if iterations.value == MISSING {
            self.todo("set missing iterations");
        }
        if iterations.value == "0" {
            self.todo("set iterations for \"until stopped\"");
        }
        iterations.value.clone()
    }

    /// Flags a plain missing scalar, returning the value to inline.
    pub(crate) fn check_scalar(&mut self, scalar: &ScalarValue, what: &str) -> String {
        if scalar.value == MISSING {
            self.todo(&format!("missing {} ingredient", what));
        }
        scalar.value.clone()
    }

    pub(crate) fn check_stride_start(&mut self, start: &str, ingredient: &str) {
        if start == MISSING {
            self.todo("starting index for \"by stride\" not specified");
            self.todo(&format!("incomplete {} ingredient", ingredient));
        }
    }

    pub(crate) fn check_stride_step(&mut self, step: &str, ingredient: &str) {
        if step == MISSING {
            self.todo("increment for \"by stride\" not specified");
            self.todo(&format!("incomplete {} ingredient", ingredient));
        }
    }

    /// Diagnostics for a command whose segment selection was never defined.
    pub(crate) fn missing_residues(&mut self, func: &str, value: &str) {
        self.todo("undefined residues ingredient");
        if value.is_empty() {
            self.todo(&format!("select segments for {} ()", func));
        } else {
            self.todo(&format!("select segments for {} ( {} )", func, value));
        }
    }

    /// Appends the Lua statements for one resolved command.
    pub fn emit(&mut self, command: &Command) -> Result<(), GenerateError> {
        match command {
            Command::Shake { iterations } => {
                let val = self.check_iterations(iterations);
                self.line(&format!("    structure.ShakeSidechainsAll ( {} )", val));
            }
            Command::Wiggle { iterations } => {
                let val = self.check_iterations(iterations);
                self.line(&format!("    structure.WiggleAll ( {} )", val));
            }
            Command::LocalWiggle {
                iterations,
                residues,
            } => segments::local_wiggle(self, iterations, residues),
            Command::Freeze { residues } => {
                segments::freeze_family(self, residues, "freeze.FreezeAll", "freeze.Freeze")
            }
            Command::Unfreeze { residues } => {
                segments::freeze_family(self, residues, "freeze.UnfreezeAll", "freeze.Unfreeze")
            }
            Command::SetSecondaryStructure {
                residues,
                structure,
            } => segments::set_secondary_structure(self, residues, structure)?,
            Command::SetAminoAcid { residues, aa } => {
                segments::set_amino_acid(self, residues, aa)
            }
            Command::Mutate {
                iterations,
                residues,
            } => segments::mutate(self, iterations, residues),
            Command::AddBands {
                residues1,
                residues2,
            } => bands::add_bands(self, residues1, residues2),
            Command::DisableBands { bands } => {
                bands::band_command(self, bands, "band.DisableAll", "band.Disable")
            }
            Command::EnableBands { bands } => {
                bands::band_command(self, bands, "band.EnableAll", "band.Enable")
            }
            Command::RemoveBands { bands } => {
                bands::band_command(self, bands, "band.DeleteAll", "band.Delete")
            }
            Command::SetBandStrength { bands, strength } => {
                bands::set_strength(self, bands, strength)
            }
            Command::SetClashImportance { importance } => {
                let val = self.check_scalar(importance, "importance");
                self.line(&format!("    behavior.SetClashingImportance ( {} )", val));
            }
            Command::ResetPuzzle => self.line("    puzzle.StartOver ()"),
            Command::RestoreAbsoluteBest => self.line("    absolutebest.Restore ()"),
            Command::SaveRecentBest => self.line("    recentbest.Save ()"),
            Command::RestoreRecentBest => self.line("    recentbest.Restore ()"),
            Command::Quicksave { slot } => {
                let val = self.check_scalar(slot, "slot");
                self.line(&format!("    save.Quicksave ( {} )", val));
            }
            Command::Quickload { slot } => {
                let val = self.check_scalar(slot, "slot");
                self.line(&format!("    save.Quickload ( {} )", val));
            }
            Command::Comment { text } => {
                self.line("--");
                // Recorded comments may span several lines.
                for l in text.value.lines() {
                    self.line(&format!("--  {}", l));
                }
                self.line("--");
            }
        }
        Ok(())
    }
}
