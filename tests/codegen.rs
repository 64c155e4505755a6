//! Tests for the per-command Lua generators.
mod common;
use common::*;
use luachef::prelude::*;

fn scalar(defined: bool, value: &str) -> ScalarValue {
    ScalarValue {
        defined,
        value: value.to_string(),
    }
}

fn stride(start: &str, step: &str) -> SegmentSelection {
    SegmentSelection::ByStride {
        start: StrideStart::Index(start.to_string()),
        step: step.to_string(),
    }
}

fn reference(ref_id: &str) -> SegmentSelection {
    SegmentSelection::Reference {
        ref_id: ref_id.to_string(),
    }
}

#[test]
fn test_simple_shake() {
    let out = emit_one(&Command::Shake {
        iterations: scalar(true, "10"),
    });
    assert_eq!(out, "    structure.ShakeSidechainsAll ( 10 )\n");
}

#[test]
fn test_shake_with_missing_iterations() {
    let out = emit_one(&Command::Shake {
        iterations: scalar(false, "-1"),
    });
    assert_eq!(
        out,
        "--  TODO: set missing iterations\n    structure.ShakeSidechainsAll ( -1 )\n"
    );
}

#[test]
fn test_sentinel_propagation() {
    // A defined count is inlined with no diagnostics at all.
    let defined = emit_one(&Command::Wiggle {
        iterations: scalar(true, "25"),
    });
    assert!(!defined.contains("TODO"));
    assert!(defined.contains("( 25 )"));

    // The sentinel is both flagged and still inlined.
    let missing = emit_one(&Command::Wiggle {
        iterations: scalar(false, "-1"),
    });
    assert!(missing.contains("--  TODO: set missing iterations"));
    assert!(missing.contains("( -1 )"));
}

#[test]
fn test_zero_iterations_means_until_stopped() {
    let out = emit_one(&Command::Shake {
        iterations: scalar(true, "0"),
    });
    assert!(out.contains("--  TODO: set iterations for \"until stopped\""));
    assert!(out.contains("( 0 )"));
}

#[test]
fn test_freeze_shapes() {
    let all = emit_one(&Command::Freeze {
        residues: SegmentSelection::All,
    });
    assert_eq!(all, "    freeze.FreezeAll ()\n");

    let strided = emit_one(&Command::Freeze {
        residues: stride("2", "3"),
    });
    assert!(strided.contains("    for seg = 2, structure.GetCount (), 3 do\n"));
    assert!(strided.contains("        freeze.Freeze ( seg, true, true )\n"));
    assert!(strided.ends_with("    end\n"));

    let picked = emit_one(&Command::Freeze {
        residues: reference("1"),
    });
    assert!(picked.contains("    segList_1 = dialog.SelectSegments ()\n"));
    assert!(picked.contains("    for seg = 1, #segList_1 do\n"));
    assert!(picked.contains("        freeze.Freeze ( segList_1 [ seg ], true, true )\n"));

    let undefined = emit_one(&Command::Freeze {
        residues: SegmentSelection::Undefined,
    });
    assert!(undefined.contains("--  TODO: undefined residues ingredient"));
    assert!(undefined.contains("--  TODO: select segments for freeze.Freeze ()"));
    assert!(undefined.contains("    freeze.Freeze ()\n"));
}

#[test]
fn test_local_wiggle_reference_gets_full_flags() {
    let out = emit_one(&Command::LocalWiggle {
        iterations: scalar(true, "4"),
        residues: reference("1"),
    });
    assert!(out.contains("structure.LocalWiggleSelected ( 4, true, true )"));

    let strided = emit_one(&Command::LocalWiggle {
        iterations: scalar(true, "4"),
        residues: stride("1", "2"),
    });
    assert!(strided.contains("structure.LocalWiggleSelected ( 4 )"));
    assert!(strided.contains("selection.SelectRange"));
}

#[test]
fn test_incomplete_stride_diagnostics() {
    let out = emit_one(&Command::Freeze {
        residues: stride("-1", "-1"),
    });
    assert!(out.contains("--  TODO: starting index for \"by stride\" not specified"));
    assert!(out.contains("--  TODO: increment for \"by stride\" not specified"));
    assert!(out.contains("--  TODO: incomplete residues ingredient"));
}

#[test]
fn test_secondary_structure_codes() {
    let helix = emit_one(&Command::SetSecondaryStructure {
        residues: SegmentSelection::All,
        structure: scalar(true, "0"),
    });
    assert!(helix.contains("structure.SetSecondaryStructureSelected ( \"H\" )"));
    assert!(helix.contains("    selection.SelectAll ()\n"));

    let loops = emit_one(&Command::SetSecondaryStructure {
        residues: SegmentSelection::All,
        structure: scalar(true, "1"),
    });
    assert!(loops.contains("( \"L\" )"));

    let sheet = emit_one(&Command::SetSecondaryStructure {
        residues: SegmentSelection::All,
        structure: scalar(true, "2"),
    });
    assert!(sheet.contains("( \"E\" )"));

    let missing = emit_one(&Command::SetSecondaryStructure {
        residues: SegmentSelection::All,
        structure: scalar(false, "-1"),
    });
    assert!(missing.contains("--  TODO: undefined secondary structure ingredient"));
}

#[test]
fn test_unknown_structure_code_is_hard_error() {
    let mut ctx = GenContext::new();
    let err = ctx
        .emit(&Command::SetSecondaryStructure {
            residues: SegmentSelection::All,
            structure: scalar(true, "7"),
        })
        .unwrap_err();
    assert!(matches!(err, GenerateError::UnknownStructureCode { .. }));
}

#[test]
fn test_mutate_builds_selection_then_applies() {
    let out = emit_one(&Command::Mutate {
        iterations: scalar(true, "3"),
        residues: stride("1", "2"),
    });
    let apply = out.find("structure.MutateSidechainsSelected ( 3 )").unwrap();
    let select = out.find("selection.Select ( seg )").unwrap();
    assert!(select < apply);
}

#[test]
fn test_band_command_shapes() {
    let all = emit_one(&Command::DisableBands {
        bands: BandSelection::All,
    });
    assert_eq!(all, "    band.DisableAll ()\n");

    let connected = emit_one(&Command::EnableBands {
        bands: BandSelection::Connected,
    });
    assert!(connected.contains("--  TODO: the \"connected\" option actually selected spacebands..."));
    assert!(connected.contains("        if band.GetResidueEnd ( bnd ) == 0 then\n"));
    assert!(connected.contains("            band.Enable ( bnd )\n"));

    let picked = emit_one(&Command::RemoveBands {
        bands: BandSelection::Reference {
            ref_id: "1".to_string(),
        },
    });
    assert!(picked.contains("    bndList_1 = dialog.SelectBands ()\n"));
    assert!(picked.contains("        band.Delete ( bndList_1 [ bnd ] )\n"));

    let undefined = emit_one(&Command::DisableBands {
        bands: BandSelection::Undefined,
    });
    assert!(undefined.contains("--  TODO: select bands for band.Disable"));
    assert!(undefined.contains("    band.Disable ()\n"));
}

#[test]
fn test_set_strength_missing_value() {
    let out = emit_one(&Command::SetBandStrength {
        bands: BandSelection::All,
        strength: scalar(false, "-1"),
    });
    assert!(out.contains("--  TODO: missing strength ingredient"));
    assert!(out.contains("        band.SetStrength ( bnd, -1 )\n"));
}

#[test]
fn test_reference_dedup_within_recipe() {
    // Two commands naming the same pick declare it exactly once.
    let mut ctx = GenContext::new();
    ctx.emit(&Command::Freeze {
        residues: reference("1"),
    })
    .unwrap();
    ctx.emit(&Command::Unfreeze {
        residues: reference("1"),
    })
    .unwrap();
    let out = ctx.into_output();

    let declaration = "    segList_1 = dialog.SelectSegments ()\n";
    assert_eq!(out.matches(declaration).count(), 1);
    assert_eq!(out.matches("for seg = 1, #segList_1 do").count(), 2);
}

#[test]
fn test_out_of_sequence_pick_diagnostic() {
    let mut ctx = GenContext::new();
    ctx.emit(&Command::Freeze {
        residues: reference("5"),
    })
    .unwrap();
    let out = ctx.into_output();
    assert!(out.contains("--  TODO: user pick reference 5 out of sequence (0 picks declared)"));
    assert!(out.contains("    segList_5 = dialog.SelectSegments ()\n"));
}

#[test]
fn test_segment_and_band_picks_are_independent() {
    let mut ctx = GenContext::new();
    ctx.emit(&Command::Freeze {
        residues: reference("1"),
    })
    .unwrap();
    ctx.emit(&Command::DisableBands {
        bands: BandSelection::Reference {
            ref_id: "1".to_string(),
        },
    })
    .unwrap();
    let out = ctx.into_output();
    assert!(out.contains("segList_1 = dialog.SelectSegments ()"));
    assert!(out.contains("bndList_1 = dialog.SelectBands ()"));
}

#[test]
fn test_add_bands_matrix_is_complete() {
    // Every ordered pair of the four selection variants generates something
    // that invokes the banding call; none are a lookup failure.
    let variants = |ref_id: &str| {
        vec![
            SegmentSelection::All,
            stride("2", "3"),
            reference(ref_id),
            SegmentSelection::Undefined,
        ]
    };
    for first in variants("1") {
        for second in variants("2") {
            let out = emit_one(&Command::AddBands {
                residues1: first.clone(),
                residues2: second.clone(),
            });
            assert!(
                out.contains("band.AddBetweenSegments"),
                "no banding call for pair {:?} / {:?}:\n{}",
                first,
                second,
                out
            );
        }
    }
}

#[test]
fn test_add_bands_all_all_orders_distinct_pairs() {
    let out = emit_one(&Command::AddBands {
        residues1: SegmentSelection::All,
        residues2: SegmentSelection::All,
    });
    let expected = [
        "    for seg1 = 1, structure.GetCount () do",
        "        for seg2 = seg1 + 1, structure.GetCount () do",
        "            band.AddBetweenSegments ( seg1, seg2 )",
        "        end",
        "    end",
    ]
    .map(|line| format!("{}\n", line))
    .join("");
    assert_eq!(out, expected);
}

#[test]
fn test_add_bands_stride_pair_guards_self_pairs() {
    let out = emit_one(&Command::AddBands {
        residues1: stride("1", "2"),
        residues2: stride("2", "2"),
    });
    assert!(out.contains("    for seg1 = 1, structure.GetCount (), 2 do\n"));
    assert!(out.contains("        for seg2 = 2, structure.GetCount (), 2 do\n"));
    assert!(out.contains("            if seg1 ~= seg2 then\n"));
}

#[test]
fn test_add_bands_reference_reference() {
    let out = emit_one(&Command::AddBands {
        residues1: reference("1"),
        residues2: reference("2"),
    });
    // Both picks are declared, left side first.
    let first = out.find("segList_1 = dialog.SelectSegments ()").unwrap();
    let second = out.find("segList_2 = dialog.SelectSegments ()").unwrap();
    assert!(first < second);
    assert!(out.contains("--  TODO: generating for loop using \"segList_2\" as reference"));
    assert!(out.contains("            if segList_1 [ segidx1 ] ~= segList_2 [ segidx2 ] then\n"));
    assert!(out.contains(
        "                band.AddBetweenSegments ( segList_1 [ segidx1 ], segList_2 [ segidx2 ] )\n"
    ));
}

#[test]
fn test_add_bands_undefined_sides_stay_syntactic() {
    let left_missing = emit_one(&Command::AddBands {
        residues1: SegmentSelection::Undefined,
        residues2: SegmentSelection::All,
    });
    assert!(left_missing.contains("--  TODO: undefined residues1 ingredient"));
    assert!(left_missing
        .contains("--  TODO: select segments for segmentIndex1 argument to band.AddBetweenSegments"));
    assert!(left_missing.contains("        band.AddBetweenSegments ( , seg2 )\n"));

    let right_missing = emit_one(&Command::AddBands {
        residues1: SegmentSelection::All,
        residues2: SegmentSelection::Undefined,
    });
    assert!(right_missing.contains("--  TODO: undefined residues2 ingredient"));
    assert!(right_missing.contains("        band.AddBetweenSegments ( seg1, )\n"));

    let both_missing = emit_one(&Command::AddBands {
        residues1: SegmentSelection::Undefined,
        residues2: SegmentSelection::Undefined,
    });
    assert!(both_missing.contains("    band.AddBetweenSegments ()\n"));
}

#[test]
fn test_add_bands_stride_reference_start_walks_picks() {
    let out = emit_one(&Command::AddBands {
        residues1: SegmentSelection::ByStride {
            start: StrideStart::Reference("1".to_string()),
            step: "4".to_string(),
        },
        residues2: SegmentSelection::All,
    });
    assert!(out.contains("segList_1 = dialog.SelectSegments ()"));
    assert!(out.contains("    for segidx1 = 1, #segList_1 do\n"));
    // The recorded step does not apply to a pick list.
    assert!(!out.contains(", 4 do"));
}

#[test]
fn test_comment_splits_lines() {
    let out = emit_one(&Command::Comment {
        text: ScalarValue {
            defined: true,
            value: "first line\nsecond line".to_string(),
        },
    });
    assert_eq!(out, "--\n--  first line\n--  second line\n--\n");
}

#[test]
fn test_simple_state_commands() {
    assert_eq!(emit_one(&Command::ResetPuzzle), "    puzzle.StartOver ()\n");
    assert_eq!(
        emit_one(&Command::RestoreAbsoluteBest),
        "    absolutebest.Restore ()\n"
    );
    assert_eq!(emit_one(&Command::SaveRecentBest), "    recentbest.Save ()\n");
    assert_eq!(
        emit_one(&Command::RestoreRecentBest),
        "    recentbest.Restore ()\n"
    );

    let save = emit_one(&Command::Quicksave {
        slot: scalar(true, "3"),
    });
    assert_eq!(save, "    save.Quicksave ( 3 )\n");

    let load = emit_one(&Command::Quickload {
        slot: scalar(false, "-1"),
    });
    assert!(load.contains("--  TODO: missing slot ingredient"));
    assert!(load.contains("    save.Quickload ( -1 )\n"));
}

#[test]
fn test_clash_importance() {
    let out = emit_one(&Command::SetClashImportance {
        importance: scalar(true, "0.7"),
    });
    assert_eq!(out, "    behavior.SetClashingImportance ( 0.7 )\n");
}
