//! Whole-file load and save helpers
//!
//! The engine works on fully resident buffers; these helpers are the only
//! place it touches the filesystem. Handles are scoped to the call and
//! released on every exit path.

use crate::error::{Error, Result};
use std::path::Path;

/// Read an entire file into an owned buffer
pub fn load(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))
}

/// Write a buffer to a file, creating or truncating it
pub fn save(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|e| Error::io(format!("writing {}", path.display()), e))
}
