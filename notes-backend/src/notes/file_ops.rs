//! File operations for the notes data file
//!
//! The whole collection lives in one pretty-printed JSON array. Writes always
//! replace the entire file.

use std::fs;
use std::io::Write;
use std::path::Path;

use notes_types::Note;

use super::error::{NoteStoreError, Result};

/// Read and parse the data file
pub fn read_notes(path: &Path) -> Result<Vec<Note>> {
    let raw = fs::read_to_string(path).map_err(|e| NoteStoreError::persistence(path, e))?;
    let notes = serde_json::from_str(&raw)?;
    Ok(notes)
}

/// Serialize the full collection and overwrite the data file (creates parent directories as needed)
pub fn write_notes(path: &Path, notes: &[Note]) -> Result<()> {
    let body = serde_json::to_string_pretty(notes)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| NoteStoreError::persistence(parent, e))?;
    }
    let mut file = fs::File::create(path).map_err(|e| NoteStoreError::persistence(path, e))?;
    file.write_all(body.as_bytes())
        .map_err(|e| NoteStoreError::persistence(path, e))?;
    Ok(())
}
