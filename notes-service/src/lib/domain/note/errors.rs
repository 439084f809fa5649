use thiserror::Error;

use crate::domain::note::models::NoteId;

/// Error type for NoteId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteIdError {
    #[error("Invalid note ID format: {0}")]
    InvalidFormat(String),
}

/// Error type for NoteTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteTitleError {
    #[error("Note title is empty")]
    Empty,

    #[error("Note title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for NoteContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteContentError {
    #[error("Note content too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all note-related operations
#[derive(Debug, Clone, Error)]
pub enum NoteError {
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(#[from] NoteIdError),

    #[error("Invalid note title: {0}")]
    InvalidTitle(#[from] NoteTitleError),

    #[error("Invalid note content: {0}")]
    InvalidContent(#[from] NoteContentError),

    #[error("Note not found: {0}")]
    NotFound(NoteId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
