//! File discovery and per-file check/fix processing.
//!
//! This is the I/O layer around the pure scanner and rewriter.

mod discovery;
mod processing;

pub use discovery::*;
pub use processing::*;

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("Invalid file type definition: {0}")]
    FileTypes(#[from] ignore::Error),
}
