//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need: the scanner and its options, the
//! output seam, the descriptor types, and the error enums.
//!
//! # Example
//!
//! ```rust,no_run
//! use luachef::prelude::*;
//! use std::io::BufReader;
//!
//! # fn run_example() -> Result<()> {
//! let file = std::fs::File::open("all.macro")?;
//! let mut sink = DirectorySink::new("recipes");
//! let mut report = Vec::new();
//!
//! let scanner = Scanner::new(ScanOptions::default());
//! let stats = scanner.scan(BufReader::new(file), &mut sink, &mut report)?;
//!
//! println!("recipes read = {}", stats.records_read);
//! # Ok(())
//! # }
//! ```

// Scanning and output
pub use crate::output::{DirectorySink, RecipeSink};
pub use crate::scanner::{lua_file_name, DecodeDiagnostic, RunStats, ScanOptions, Scanner};

// Tolerant-format reading
pub use crate::spirit::stream::{LineRecord, RecordSplitter};
pub use crate::spirit::{from_spirit, restore_commas};

// Recipe model and descriptors
pub use crate::recipe::{
    BandSelection, Command, RecipeKind, RecipeRecord, ScalarValue, SegmentSelection, StrideStart,
};

// Code generation
pub use crate::codegen::{GenContext, PickTable};

// Error types
pub use crate::error::{GenerateError, ScanError, SpiritError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
