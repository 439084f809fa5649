use async_trait::async_trait;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::NewNote;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::user::models::UserId;

/// Port for note domain service operations.
///
/// Every operation is scoped to the authenticated owner; notes of other
/// users behave as if they did not exist.
#[async_trait]
pub trait NoteServicePort: Send + Sync + 'static {
    /// Create a note owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_note(&self, owner: UserId, command: CreateNoteCommand)
        -> Result<Note, NoteError>;

    /// List the owner's notes, most recently created first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>, NoteError>;

    /// Retrieve one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn get_note(&self, owner: UserId, id: NoteId) -> Result<Note, NoteError>;

    /// Update one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_note(
        &self,
        owner: UserId,
        id: NoteId,
        command: UpdateNoteCommand,
    ) -> Result<Note, NoteError>;

    /// Delete one of the owner's notes.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_note(&self, owner: UserId, id: NoteId) -> Result<(), NoteError>;
}

/// Persistence operations for note aggregate.
#[async_trait]
pub trait NoteRepository: Send + Sync + 'static {
    /// Persist a new note; the store assigns its id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, note: NewNote) -> Result<Note, NoteError>;

    /// Retrieve note by identifier, regardless of owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteError>;

    /// Retrieve all notes of one owner, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NoteError>;

    /// Overwrite title, content and `updated_at` of an existing note.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, note: Note) -> Result<Note, NoteError>;

    /// Remove note from storage.
    ///
    /// # Errors
    /// * `NotFound` - Note does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: NoteId) -> Result<(), NoteError>;
}
