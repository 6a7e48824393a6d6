//! NoteStore — in-memory note collection with a JSON file mirror
//!
//! Every operation takes the same lock, and mutations rewrite the data file
//! before the lock is released, so concurrent requests are applied one at a
//! time. A failed write leaves the in-memory change in place; the file
//! catches up on the next successful write.

use chrono::{DateTime, SubsecRound, Utc};
use notes_types::{Note, UpdateNoteRequest};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::error::{NoteStoreError, Result};
use super::file_ops;
use super::query::{self, ListQuery, NotePage};

#[derive(Default)]
struct StoreState {
    notes: Vec<Note>,
    initialized: bool,
}

impl StoreState {
    fn ready(&mut self) -> Result<&mut Vec<Note>> {
        if !self.initialized {
            return Err(NoteStoreError::NotInitialized);
        }
        Ok(&mut self.notes)
    }
}

/// Owner of the note collection and its backing file
pub struct NoteStore {
    data_path: PathBuf,
    state: Mutex<StoreState>,
}

/// Current time at the precision the data file keeps
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl NoteStore {
    /// Create an empty, uninitialized store backed by `data_path`
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load the data file into memory. A missing or unreadable file resets the
    /// store to empty and writes that back out. Calling this again is a no-op.
    pub fn initialize(&self) -> Result<usize> {
        let mut state = self.state.lock();
        if state.initialized {
            return Ok(state.notes.len());
        }

        match file_ops::read_notes(&self.data_path) {
            Ok(notes) => {
                log::info!("[NOTES] Loaded {} notes from storage", notes.len());
                state.notes = notes;
            }
            Err(e) => {
                if self.data_path.exists() {
                    log::warn!("[NOTES] Discarding unreadable data file: {}", e);
                }
                state.notes = Vec::new();
                file_ops::write_notes(&self.data_path, &state.notes)?;
                log::info!(
                    "[NOTES] Initialized empty notes storage at {}",
                    self.data_path.display()
                );
            }
        }

        state.initialized = true;
        Ok(state.notes.len())
    }

    /// Create a note with a fresh id and identical created/updated timestamps
    pub fn create(&self, title: &str, content: &str) -> Result<Note> {
        let mut state = self.state.lock();
        let notes = state.ready()?;

        let mut id = Uuid::new_v4().to_string();
        while notes.iter().any(|n| n.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let ts = now();
        let note = Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: ts,
            updated_at: ts,
        };

        notes.push(note.clone());
        file_ops::write_notes(&self.data_path, notes)?;

        log::debug!("[NOTES] Created note {}", note.id);
        Ok(note)
    }

    /// Get a note by id
    pub fn get(&self, id: &str) -> Result<Note> {
        let mut state = self.state.lock();
        let notes = state.ready()?;

        notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| NoteStoreError::NotFound(id.to_string()))
    }

    /// Apply the fields present in `changes` and bump the updated timestamp
    pub fn update(&self, id: &str, changes: UpdateNoteRequest) -> Result<Note> {
        let mut state = self.state.lock();
        let notes = state.ready()?;

        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NoteStoreError::NotFound(id.to_string()))?;

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(content) = changes.content {
            note.content = content;
        }
        // Clamp so a clock step backwards never moves updated_at behind itself.
        note.updated_at = now().max(note.updated_at);

        let updated = note.clone();
        file_ops::write_notes(&self.data_path, notes)?;

        log::debug!("[NOTES] Updated note {}", id);
        Ok(updated)
    }

    /// Remove a note by id
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock();
        let notes = state.ready()?;

        let index = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NoteStoreError::NotFound(id.to_string()))?;

        notes.remove(index);
        file_ops::write_notes(&self.data_path, notes)?;

        log::debug!("[NOTES] Deleted note {}", id);
        Ok(())
    }

    /// Filtered, paginated listing in insertion order
    pub fn list(&self, query: &ListQuery) -> Result<NotePage> {
        let mut state = self.state.lock();
        let notes = state.ready()?;
        Ok(query::run(notes, query))
    }

    /// Number of notes currently held
    pub fn count(&self) -> Result<usize> {
        let mut state = self.state.lock();
        Ok(state.ready()?.len())
    }
}
