use serde_json::{Map, Value};

/// Default values for the administrative attributes shared by GUI and Lua
/// recipes. Old example recipes in circulation omit several of these, so the
/// whole bag is back-filled once during normalization.
const ATTRIBUTE_DEFAULTS: &[(&str, &str)] = &[
    ("name", "unknown"),
    ("desc", "unknown"),
    ("size", "0"),
    ("type", "gui"),
    ("folder_name", "unknown"),
    ("hidden", "0"),
    ("mid", "0"),
    ("mrid", "0"),
    ("parent", "0"),
    ("parent_mrid", "0"),
    ("player_id", "0"),
    ("share_scope", "0"),
    ("uses", "0"),
];

/// Attributes listed in the block-comment header of a generated GUI recipe.
pub const GUI_HEADER_ATTRS: &[&str] = &[
    "name",
    "desc",
    "size",
    "type",
    "folder_name",
    "hidden",
    "mid",
    "mrid",
    "parent",
    "parent_mrid",
    "player_id",
    "share_scope",
    "uses",
];

/// Attributes listed in the header of a passed-through Lua recipe. Slightly
/// different set: no command count, but the script interface versions.
pub const SCRIPT_HEADER_ATTRS: &[&str] = &[
    "name",
    "desc",
    "type",
    "folder_name",
    "hidden",
    "mid",
    "mrid",
    "parent",
    "parent_mrid",
    "player_id",
    "share_scope",
    "uses",
    "script_version",
    "ver",
];

/// How a recipe was authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeKind {
    /// Recorded visually as a sequence of commands.
    Gui,
    /// Written directly against the Lua interface.
    Script,
    /// Anything else; counted as read but otherwise ignored.
    Other,
}

/// One automation recipe, normalized so that every administrative attribute
/// is present.
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    fields: Map<String, Value>,
}

impl RecipeRecord {
    /// Wraps a raw record map, back-filling missing administrative
    /// attributes from the declarative default table. Pure and total.
    pub fn normalize(mut fields: Map<String, Value>) -> Self {
        for (key, default) in ATTRIBUTE_DEFAULTS {
            if !fields.contains_key(*key) {
                fields.insert(key.to_string(), Value::String(default.to_string()));
            }
        }
        Self { fields }
    }

    /// The attribute as a string slice, when present and a string.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// The attribute rendered for display: string values verbatim, anything
    /// else through its JSON form, absent values as `default`.
    pub fn attr_display(&self, name: &str, default: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or("unknown")
    }

    pub fn desc(&self) -> &str {
        self.attr("desc").unwrap_or("unknown")
    }

    pub fn kind(&self) -> RecipeKind {
        match self.attr("type") {
            Some("gui") => RecipeKind::Gui,
            Some("script") => RecipeKind::Script,
            _ => RecipeKind::Other,
        }
    }

    /// Declared command count of a GUI recipe. Attributes are stored as
    /// strings in the source; anything unparseable reads as zero commands.
    pub fn size(&self) -> usize {
        self.attr("size")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// The raw spirit blob of the `index`-th command slot.
    pub fn command_blob(&self, index: usize) -> Option<&str> {
        self.fields
            .get(&format!("action-{}", index))
            .and_then(Value::as_str)
    }
}
