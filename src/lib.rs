//! # LuaChef - Cookbook Recipe Transpiler
//!
//! **LuaChef** converts recorded Foldit GUI recipes, as stored in cookbook
//! files (`all.macro`, `single.macro`), into equivalent Lua V2 scripts. A
//! visually recorded recipe becomes a script-level starting point the author
//! can refine by hand.
//!
//! ## Core Workflow
//!
//! The pipeline runs strictly in order over one input stream:
//!
//! 1.  **Split**: each non-structural line of the cookbook is one record in
//!     the lenient "JSON Spirit" serialization, which is JSON minus the commas
//!     between sibling pairs. The splitter also recognizes the alternate
//!     `single.macro` layout, where one recipe's fields are spread across
//!     many lines and merged at end of stream.
//! 2.  **Repair and parse**: the spirit reader restores the separators and
//!     hands the result to a strict JSON parser, recursively for the nested
//!     command and ingredient blobs.
//! 3.  **Normalize**: legacy records get their missing administrative
//!     attributes back-filled from a declarative default table.
//! 4.  **Resolve**: each command argument blob becomes a typed descriptor:
//!     a segment or band selection variant, or a scalar with its
//!     definedness preserved.
//! 5.  **Generate**: every command has a generator that appends Lua to the
//!     recipe's buffer. Selections dispatch exhaustively over their
//!     variants; the dual-selection banding command dispatches over the
//!     ordered pair, sixteen loop shapes in all. Undefined ingredients
//!     degrade to `-1` sentinels with inline `TODO` diagnostics, so the
//!     output is always syntactically complete.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use luachef::prelude::*;
//! use std::io::BufReader;
//!
//! fn main() -> Result<()> {
//!     let file = std::fs::File::open("all.macro")?;
//!     let mut sink = DirectorySink::new("out");
//!     let mut report = std::io::stdout();
//!
//!     let options = ScanOptions {
//!         detail: true,
//!         ..ScanOptions::default()
//!     };
//!     let stats = Scanner::new(options).scan(BufReader::new(file), &mut sink, &mut report)?;
//!
//!     println!("recipes read = {}", stats.records_read);
//!     println!("GUI recipes = {}", stats.gui_recipes);
//!     println!("JSON errors = {}", stats.decode_error_count());
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod error;
pub mod output;
pub mod prelude;
pub mod recipe;
pub mod scanner;
pub mod spirit;
