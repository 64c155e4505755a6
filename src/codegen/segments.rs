//! Generators for commands that act on a single segment selection.
//!
//! The four selection variants fall into two emission shapes: commands that
//! apply per segment inside the loop, and commands that build a selection
//! first and apply once. Stride and reference selections both reduce to a
//! [`SegIter`] describing the loop to emit.

use crate::codegen::GenContext;
use crate::error::GenerateError;
use crate::recipe::{ScalarValue, SegmentSelection, StrideStart, MISSING};

/// A resolved iteration scheme over segments.
pub(crate) enum SegIter {
    /// `for seg = start, structure.GetCount (), step do` over raw indices.
    Stride { start: String, step: String },
    /// Positional walk of a user-pick list.
    Picks { table: String },
}

impl SegIter {
    /// The Lua expression naming the current segment inside the loop.
    pub(crate) fn segment_expr(&self) -> String {
        match self {
            SegIter::Stride { .. } => "seg".to_string(),
            SegIter::Picks { table } => format!("{} [ seg ]", table),
        }
    }

    pub(crate) fn open(&self, ctx: &mut GenContext) {
        match self {
            SegIter::Stride { start, step } => ctx.line(&format!(
                "    for seg = {}, structure.GetCount (), {} do",
                start, step
            )),
            SegIter::Picks { table } => ctx.line(&format!("    for seg = 1, #{} do", table)),
        }
    }

    pub(crate) fn close(&self, ctx: &mut GenContext) {
        ctx.line("    end");
    }
}

/// Reduces a stride or reference selection to its loop, emitting stride
/// diagnostics and pick declarations on the way. `All` and `Undefined`
/// have no loop and return `None`.
pub(crate) fn seg_iteration(
    ctx: &mut GenContext,
    residues: &SegmentSelection,
    ingredient: &str,
) -> Option<SegIter> {
    match residues {
        SegmentSelection::ByStride {
            start: StrideStart::Index(index),
            step,
        } => {
            ctx.check_stride_start(index, ingredient);
            ctx.check_stride_step(step, ingredient);
            Some(SegIter::Stride {
                start: index.clone(),
                step: step.clone(),
            })
        }
        // A pick list carries no index arithmetic; the recorded step does
        // not apply and the list is walked positionally.
        SegmentSelection::ByStride {
            start: StrideStart::Reference(ref_id),
            ..
        } => Some(SegIter::Picks {
            table: ctx.seg_pick(ref_id),
        }),
        SegmentSelection::Reference { ref_id } => Some(SegIter::Picks {
            table: ctx.seg_pick(ref_id),
        }),
        SegmentSelection::All | SegmentSelection::Undefined => None,
    }
}

/// Builds a selection from the iteration scheme, applies `apply_line` once,
/// then clears the selection again.
fn select_apply(ctx: &mut GenContext, iter: &SegIter, apply_line: &str) {
    ctx.line("    selection.DeselectAll ()");
    iter.open(ctx);
    ctx.line(&format!("        selection.Select ( {} )", iter.segment_expr()));
    iter.close(ctx);
    ctx.line(apply_line);
    ctx.line("    selection.DeselectAll ()");
}

pub(crate) fn local_wiggle(
    ctx: &mut GenContext,
    iterations: &ScalarValue,
    residues: &SegmentSelection,
) {
    let val = ctx.check_iterations(iterations);
    match residues {
        SegmentSelection::All => {
            ctx.line(&format!("    structure.LocalWiggleAll ( {} )", val));
        }
        SegmentSelection::Undefined => {
            ctx.missing_residues("structure.LocalWiggleSelected", &val);
            ctx.line(&format!("    structure.LocalWiggleSelected ( {} )", val));
        }
        selected => {
            // Picks recorded as a plain reference get the full wiggle flags.
            let call = if matches!(selected, SegmentSelection::Reference { .. }) {
                format!("        structure.LocalWiggleSelected ( {}, true, true )", val)
            } else {
                format!("        structure.LocalWiggleSelected ( {} )", val)
            };
            if let Some(iter) = seg_iteration(ctx, selected, "residues") {
                iter.open(ctx);
                ctx.line("        selection.DeselectAll ()");
                ctx.line("    --  TODO: use selection.SelectRange to local wiggle multiple segments");
                ctx.line(&format!(
                    "        selection.Select ( {} )",
                    iter.segment_expr()
                ));
                ctx.line(&call);
                iter.close(ctx);
            }
        }
    }
}

/// `lock` and `unlock` share their shape; only the runtime calls differ.
pub(crate) fn freeze_family(
    ctx: &mut GenContext,
    residues: &SegmentSelection,
    all_call: &str,
    each_call: &str,
) {
    match residues {
        SegmentSelection::All => ctx.line(&format!("    {} ()", all_call)),
        SegmentSelection::Undefined => {
            ctx.missing_residues(each_call, "");
            ctx.line(&format!("    {} ()", each_call));
        }
        selected => {
            if let Some(iter) = seg_iteration(ctx, selected, "residues") {
                iter.open(ctx);
                ctx.line(&format!(
                    "        {} ( {}, true, true )",
                    each_call,
                    iter.segment_expr()
                ));
                iter.close(ctx);
            }
        }
    }
}

/// Decodes the recorded secondary-structure code into its Lua letter.
fn decode_structure(
    ctx: &mut GenContext,
    structure: &ScalarValue,
) -> Result<String, GenerateError> {
    match structure.value.as_str() {
        MISSING => {
            ctx.todo("undefined secondary structure ingredient");
            Ok(MISSING.to_string())
        }
        "0" => Ok("H".to_string()),
        "1" => Ok("L".to_string()),
        "2" => Ok("E".to_string()),
        other => Err(GenerateError::UnknownStructureCode {
            code: other.to_string(),
        }),
    }
}

pub(crate) fn set_secondary_structure(
    ctx: &mut GenContext,
    residues: &SegmentSelection,
    structure: &ScalarValue,
) -> Result<(), GenerateError> {
    let ss = decode_structure(ctx, structure)?;
    let apply = format!("    structure.SetSecondaryStructureSelected ( \"{}\" )", ss);
    match residues {
        SegmentSelection::All => {
            ctx.line("    selection.SelectAll ()");
            ctx.line(&apply);
            ctx.line("    selection.DeselectAll ()");
        }
        SegmentSelection::Undefined => {
            ctx.missing_residues("structure.SetSecondaryStructureSelected", &ss);
            ctx.line(&apply);
        }
        selected => {
            if let Some(iter) = seg_iteration(ctx, selected, "residues") {
                select_apply(ctx, &iter, &apply);
            }
        }
    }
    Ok(())
}

pub(crate) fn set_amino_acid(
    ctx: &mut GenContext,
    residues: &SegmentSelection,
    aa: &ScalarValue,
) {
    if aa.value == MISSING {
        ctx.todo("undefined amino acid ingredient");
    }
    let apply = format!("    structure.SetAminoAcidSelected ( \"{}\" )", aa.value);
    match residues {
        SegmentSelection::All => {
            ctx.line("    selection.SelectAll ()");
            ctx.line(&apply);
            ctx.line("    selection.DeselectAll ()");
        }
        SegmentSelection::Undefined => {
            ctx.missing_residues("structure.SetAminoAcidSelected", &aa.value);
            ctx.line(&apply);
        }
        selected => {
            if let Some(iter) = seg_iteration(ctx, selected, "residues") {
                select_apply(ctx, &iter, &apply);
            }
        }
    }
}

pub(crate) fn mutate(
    ctx: &mut GenContext,
    iterations: &ScalarValue,
    residues: &SegmentSelection,
) {
    let val = ctx.check_iterations(iterations);
    let apply = format!("    structure.MutateSidechainsSelected ( {} )", val);
    match residues {
        SegmentSelection::All => {
            ctx.line(&format!("    structure.MutateSidechainsAll ( {} )", val));
        }
        SegmentSelection::Undefined => {
            ctx.missing_residues("structure.MutateSidechainsSelected", &val);
            ctx.line(&apply);
        }
        selected => {
            if let Some(iter) = seg_iteration(ctx, selected, "residues") {
                select_apply(ctx, &iter, &apply);
            }
        }
    }
}
