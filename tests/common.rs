//! Common test utilities for building spirit-formatted fixtures.
use luachef::prelude::*;
use serde_json::Value;
use std::io;

/// Collects generated recipes in memory instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub recipes: Vec<(String, String)>,
}

impl RecipeSink for MemorySink {
    fn write_recipe(&mut self, file_name: &str, text: &str) -> io::Result<()> {
        self.recipes.push((file_name.to_string(), text.to_string()));
        Ok(())
    }
}

/// Renders key-value pairs as a spirit block: braces on their own lines,
/// no commas between the pairs, values JSON-escaped (so a nested block
/// becomes a single escaped line, exactly as the cookbook stores them).
#[allow(dead_code)]
pub fn spirit_block(pairs: &[(&str, &str)]) -> String {
    let mut block = String::from("{\n");
    for (key, value) in pairs {
        block.push_str(&format!("\"{}\" : {}\n", key, Value::from(*value)));
    }
    block.push_str("}\n");
    block
}

/// A scalar ingredient blob (`is_defined`/`value` pair).
#[allow(dead_code)]
pub fn scalar_blob(name: &str, defined: bool, value: &str) -> String {
    spirit_block(&[
        ("name", name),
        ("is_defined", if defined { "1" } else { "0" }),
        ("value", value),
    ])
}

#[allow(dead_code)]
pub fn residues_all() -> String {
    spirit_block(&[("name", "residues_all")])
}

#[allow(dead_code)]
pub fn residues_undefined() -> String {
    spirit_block(&[("name", "residues_undefined")])
}

#[allow(dead_code)]
pub fn residues_ref(ref_id: &str) -> String {
    spirit_block(&[("name", "residues_ref"), ("ref-id", ref_id)])
}

/// A by-stride selection starting at a literal index.
#[allow(dead_code)]
pub fn residues_by_stride_index(defined: bool, start: &str, step_defined: bool, step: &str) -> String {
    let index = spirit_block(&[
        ("is_defined", if defined { "1" } else { "0" }),
        ("value", start),
    ]);
    let start_blob = spirit_block(&[("name", "single_residue_by_index"), ("index", index.as_str())]);
    let step_blob = spirit_block(&[
        ("is_defined", if step_defined { "1" } else { "0" }),
        ("value", step),
    ]);
    spirit_block(&[
        ("name", "residues_by_stride"),
        ("start", start_blob.as_str()),
        ("step", step_blob.as_str()),
    ])
}

/// A by-stride selection whose start is a user-pick reference.
#[allow(dead_code)]
pub fn residues_by_stride_ref(ref_id: &str, step: &str) -> String {
    let start_blob = spirit_block(&[("name", "residues_ref"), ("ref-id", ref_id)]);
    let step_blob = spirit_block(&[("is_defined", "1"), ("value", step)]);
    spirit_block(&[
        ("name", "residues_by_stride"),
        ("start", start_blob.as_str()),
        ("step", step_blob.as_str()),
    ])
}

#[allow(dead_code)]
pub fn bands_tag(tag: &str) -> String {
    spirit_block(&[("name", tag)])
}

#[allow(dead_code)]
pub fn bands_ref(ref_id: &str) -> String {
    spirit_block(&[("name", "bands_reference"), ("ref-id", ref_id)])
}

/// A command blob: the command name plus its ingredient blobs.
#[allow(dead_code)]
pub fn command_blob(name: &str, args: &[(&str, &str)]) -> String {
    let mut pairs = vec![("name", name)];
    pairs.extend(args.iter().copied());
    spirit_block(&pairs)
}

/// One `all.macro` line: a recipe name mapped to its escaped spirit blob.
#[allow(dead_code)]
pub fn recipe_line(recipe_name: &str, fields: &[(&str, &str)]) -> String {
    let blob = spirit_block(fields);
    format!("\"{}\" : {}", recipe_name, Value::from(blob.as_str()))
}

/// A minimal one-command GUI recipe as a full cookbook line.
#[allow(dead_code)]
pub fn gui_recipe_line(recipe_name: &str, action0: &str) -> String {
    recipe_line(
        recipe_name,
        &[
            ("name", recipe_name),
            ("desc", "a test recipe"),
            ("type", "gui"),
            ("size", "1"),
            ("action-0", action0),
        ],
    )
}

/// Resolves one command blob into its typed form.
#[allow(dead_code)]
pub fn resolve_command(name: &str, args: &[(&str, &str)]) -> Command {
    let blob = command_blob(name, args);
    let map = from_spirit(&blob).expect("fixture blob parses");
    Command::resolve(name, &map).expect("fixture command resolves")
}

/// Emits one command into a fresh context and returns the Lua text.
#[allow(dead_code)]
pub fn emit_one(command: &Command) -> String {
    let mut ctx = GenContext::new();
    ctx.emit(command).expect("fixture command generates");
    ctx.into_output()
}
