//! Request validation for the notes API
//!
//! Everything here runs before the store is touched; the store assumes its
//! inputs already passed these checks.

use notes_types::{CreateNoteRequest, ListNotesQuery, UpdateNoteRequest};
use thiserror::Error;
use uuid::Uuid;

use crate::notes::ListQuery;

pub const MIN_TITLE_CHARS: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    // Length in UTF-16 code units, the unit browser clients measure in
    if title.encode_utf16().count() < MIN_TITLE_CHARS {
        return Err(ValidationError::new(format!(
            "Title must be at least {} characters",
            MIN_TITLE_CHARS
        )));
    }
    Ok(())
}

fn check_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::new("Content is required"));
    }
    Ok(())
}

pub fn validate_create(req: &CreateNoteRequest) -> Result<(), ValidationError> {
    check_title(&req.title)?;
    check_content(&req.content)
}

pub fn validate_update(req: &UpdateNoteRequest) -> Result<(), ValidationError> {
    if let Some(title) = &req.title {
        check_title(title)?;
    }
    if let Some(content) = &req.content {
        check_content(content)?;
    }
    if req.is_empty() {
        return Err(ValidationError::new(
            "At least one field (title or content) must be provided",
        ));
    }
    Ok(())
}

/// Ids are hyphenated UUIDs; other UUID spellings are rejected
pub fn validate_note_id(id: &str) -> Result<(), ValidationError> {
    if id.len() == 36 && Uuid::try_parse(id).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("Invalid note ID format"))
    }
}

/// Convert the wire query into store parameters (zero page/limit fall back to the defaults)
pub fn list_query(query: ListNotesQuery) -> ListQuery {
    ListQuery::new(
        query.search,
        query.page.map(|p| p as usize),
        query.limit.map(|l| l as usize),
    )
}
