use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::note::errors::NoteContentError;
use crate::domain::note::errors::NoteIdError;
use crate::domain::note::errors::NoteTitleError;
use crate::domain::user::models::UserId;

/// Note unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Parse a note ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, NoteIdError> {
        s.parse::<i64>()
            .map(NoteId)
            .map_err(|e| NoteIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Note aggregate, always owned by exactly one user.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Note about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub owner_id: UserId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub created_at: DateTime<Utc>,
}

/// Note title value object.
///
/// Non-blank, at most 200 characters. Stored as given, without trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a validated note title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title exceeds 200 characters
    pub fn new(title: String) -> Result<Self, NoteTitleError> {
        if title.trim().is_empty() {
            return Err(NoteTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NoteTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Note body value object. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    const MAX_LENGTH: usize = 10_000;

    /// Create validated note content.
    ///
    /// # Errors
    /// * `TooLong` - Content exceeds 10 000 characters
    pub fn new(content: String) -> Result<Self, NoteContentError> {
        let length = content.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NoteContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a note with validated fields
#[derive(Debug)]
pub struct CreateNoteCommand {
    pub title: NoteTitle,
    pub content: NoteContent,
}

/// Command to update a note.
///
/// Only provided fields are changed.
#[derive(Debug)]
pub struct UpdateNoteCommand {
    pub title: Option<NoteTitle>,
    pub content: Option<NoteContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_title_validation() {
        assert!(NoteTitle::new("Groceries".to_string()).is_ok());
        assert_eq!(NoteTitle::new(String::new()), Err(NoteTitleError::Empty));
        assert_eq!(NoteTitle::new("   ".to_string()), Err(NoteTitleError::Empty));
        assert_eq!(
            NoteTitle::new("t".repeat(201)),
            Err(NoteTitleError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_note_title_counts_characters_not_bytes() {
        assert!(NoteTitle::new("é".repeat(200)).is_ok());
    }

    #[test]
    fn test_note_content_validation() {
        assert!(NoteContent::new(String::new()).is_ok());
        assert!(NoteContent::new("c".repeat(10_000)).is_ok());
        assert!(matches!(
            NoteContent::new("c".repeat(10_001)),
            Err(NoteContentError::TooLong { .. })
        ));
    }

    #[test]
    fn test_note_id_from_string() {
        assert_eq!(NoteId::from_string("12"), Ok(NoteId(12)));
        assert!(NoteId::from_string("twelve").is_err());
    }
}
