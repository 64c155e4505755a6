//! Lazily declared user-pick tables.
//!
//! A recipe may reference the same interactively selected segment or band
//! list from several commands. The first sight of a reference id emits the
//! Lua declaration; later sights reuse the generated table name. The ids in
//! recorded data arrive in discovery order, so a declared id is expected to
//! be exactly one past the number of picks seen so far; anything else is
//! surfaced as its own diagnostic rather than silently accepted.

/// Per-recipe, append-only table of generated pick-list names.
#[derive(Debug)]
pub struct PickTable {
    prefix: &'static str,
    dialog_call: &'static str,
    names: Vec<String>,
}

impl PickTable {
    /// Table for segment picks, declared via `dialog.SelectSegments`.
    pub fn segments() -> Self {
        Self {
            prefix: "segList_",
            dialog_call: "dialog.SelectSegments",
            names: Vec::new(),
        }
    }

    /// Table for band picks, declared via `dialog.SelectBands`.
    pub fn bands() -> Self {
        Self {
            prefix: "bndList_",
            dialog_call: "dialog.SelectBands",
            names: Vec::new(),
        }
    }

    /// Number of picks declared so far.
    pub fn declared(&self) -> usize {
        self.names.len()
    }

    /// Returns the Lua table name for `ref_id`, appending the declaration
    /// statement to `out` the first time the id is seen.
    ///
    /// The literal discipline of the recorded format is kept: a declaration
    /// happens exactly when the numeric id exceeds the count of picks seen
    /// so far. An unparseable id never declares.
    pub fn declare_or_reuse(&mut self, out: &mut String, ref_id: &str) -> String {
        let name = format!("{}{}", self.prefix, ref_id);
        let id: i64 = ref_id.trim().parse().unwrap_or(-1);
        if id > self.names.len() as i64 {
            if id != self.names.len() as i64 + 1 {
                out.push_str(&format!(
                    "--  TODO: user pick reference {} out of sequence ({} picks declared)\n",
                    ref_id,
                    self.names.len()
                ));
            }
            self.names.push(name.clone());
            out.push_str(&format!("    {} = {} ()\n", name, self.dialog_call));
        }
        name
    }
}
