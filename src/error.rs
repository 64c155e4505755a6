use thiserror::Error;

/// Errors raised while repairing and parsing the lenient cookbook serialization.
#[derive(Error, Debug, Clone)]
pub enum SpiritError {
    #[error("JSON decode error: {message} (offset {offset}, context \"{context}\")")]
    Decode {
        /// Parser message from the strict parse of the repaired text.
        message: String,
        /// Character offset of the failure within the repaired text.
        offset: usize,
        /// Excerpt of up to ten characters on either side of the failure.
        context: String,
        /// Start of the context window within the repaired text.
        context_start: usize,
        /// End of the context window within the repaired text.
        context_end: usize,
        /// The repaired text that failed to parse.
        text: String,
    },
}

/// Errors raised while resolving ingredients and generating Lua for a recipe.
///
/// Everything here except `Spirit` is a hard failure: an unknown command or
/// variant tag means the input (or the fixed command table) is defective, and
/// generation for that recipe stops. `Spirit` wraps decode failures of nested
/// command blobs, which the batch driver treats like any other bad record.
#[derive(Error, Debug, Clone)]
pub enum GenerateError {
    #[error("recipe uses an unknown command name: '{command}'")]
    UnknownCommand { command: String },

    #[error("command slot 'action-{index}' is missing from the recipe")]
    MissingCommandSlot { index: usize },

    #[error("ingredient '{ingredient}' carries an unrecognized selection tag: '{tag}'")]
    UnknownSelectionTag { ingredient: String, tag: String },

    #[error("secondary structure code '{code}' is outside the fixed H/L/E table")]
    UnknownStructureCode { code: String },

    #[error(transparent)]
    Spirit(#[from] SpiritError),
}

/// Errors that abort the remainder of a scan run.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("input stream failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}
