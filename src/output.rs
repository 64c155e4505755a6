//! Where finished recipes go.
//!
//! The scanner hands each generated recipe to a [`RecipeSink`]; the trait is
//! the seam between the transpiler core and whatever owns the filesystem.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Receives one finished recipe at a time.
pub trait RecipeSink {
    fn write_recipe(&mut self, file_name: &str, text: &str) -> io::Result<()>;
}

/// Writes each recipe as a file in a target directory. The directory itself
/// is the caller's to create.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RecipeSink for DirectorySink {
    fn write_recipe(&mut self, file_name: &str, text: &str) -> io::Result<()> {
        fs::write(self.dir.join(file_name), text)
    }
}
