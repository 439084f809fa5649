use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::NewNote;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::note::ports::NoteRepository;
use crate::domain::note::ports::NoteServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for note operations.
pub struct NoteService<NR>
where
    NR: NoteRepository,
{
    repository: Arc<NR>,
}

impl<NR> NoteService<NR>
where
    NR: NoteRepository,
{
    pub fn new(repository: Arc<NR>) -> Self {
        Self { repository }
    }

    /// Load a note, hiding notes owned by someone else behind `NotFound`.
    async fn owned_note(&self, owner: UserId, id: NoteId) -> Result<Note, NoteError> {
        match self.repository.find_by_id(id).await? {
            Some(note) if note.owner_id == owner => Ok(note),
            Some(note) => {
                tracing::warn!(
                    note_id = %id,
                    owner_id = %note.owner_id,
                    requested_by = %owner,
                    "Access to foreign note denied"
                );
                Err(NoteError::NotFound(id))
            }
            None => Err(NoteError::NotFound(id)),
        }
    }
}

#[async_trait]
impl<NR> NoteServicePort for NoteService<NR>
where
    NR: NoteRepository,
{
    async fn create_note(
        &self,
        owner: UserId,
        command: CreateNoteCommand,
    ) -> Result<Note, NoteError> {
        let note = NewNote {
            owner_id: owner,
            title: command.title,
            content: command.content,
            created_at: Utc::now(),
        };

        self.repository.create(note).await
    }

    async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>, NoteError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_note(&self, owner: UserId, id: NoteId) -> Result<Note, NoteError> {
        self.owned_note(owner, id).await
    }

    async fn update_note(
        &self,
        owner: UserId,
        id: NoteId,
        command: UpdateNoteCommand,
    ) -> Result<Note, NoteError> {
        let mut note = self.owned_note(owner, id).await?;

        if let Some(title) = command.title {
            note.title = title;
        }

        if let Some(content) = command.content {
            note.content = content;
        }

        note.updated_at = Utc::now();

        self.repository.update(note).await
    }

    async fn delete_note(&self, owner: UserId, id: NoteId) -> Result<(), NoteError> {
        self.owned_note(owner, id).await?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::note::models::NoteContent;
    use crate::domain::note::models::NoteTitle;

    mock! {
        pub TestNoteRepository {}

        #[async_trait]
        impl NoteRepository for TestNoteRepository {
            async fn create(&self, note: NewNote) -> Result<Note, NoteError>;
            async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteError>;
            async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NoteError>;
            async fn update(&self, note: Note) -> Result<Note, NoteError>;
            async fn delete(&self, id: NoteId) -> Result<(), NoteError>;
        }
    }

    const OWNER: UserId = UserId(1);
    const STRANGER: UserId = UserId(2);

    fn note(id: i64, owner: UserId, title: &str) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId(id),
            owner_id: owner,
            title: NoteTitle::new(title.to_string()).unwrap(),
            content: NoteContent::new("body".to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_note_success() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_create()
            .withf(|note| note.owner_id == OWNER && note.title.as_str() == "Groceries")
            .times(1)
            .returning(|new| {
                Ok(Note {
                    id: NoteId(10),
                    owner_id: new.owner_id,
                    title: new.title,
                    content: new.content,
                    created_at: new.created_at,
                    updated_at: new.created_at,
                })
            });

        let service = NoteService::new(Arc::new(repository));

        let command = CreateNoteCommand {
            title: NoteTitle::new("Groceries".to_string()).unwrap(),
            content: NoteContent::new("milk, eggs".to_string()).unwrap(),
        };

        let created = service.create_note(OWNER, command).await.unwrap();
        assert_eq!(created.id, NoteId(10));
        assert_eq!(created.content.as_str(), "milk, eggs");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_list_notes_scoped_to_owner() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_list_by_owner()
            .withf(|owner| *owner == OWNER)
            .times(1)
            .returning(|_| Ok(vec![note(2, OWNER, "second"), note(1, OWNER, "first")]));

        let service = NoteService::new(Arc::new(repository));

        let notes = service.list_notes(OWNER).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title.as_str(), "second");
    }

    #[tokio::test]
    async fn test_get_note_success() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .withf(|id| *id == NoteId(5))
            .times(1)
            .returning(|_| Ok(Some(note(5, OWNER, "mine"))));

        let service = NoteService::new(Arc::new(repository));

        let found = service.get_note(OWNER, NoteId(5)).await.unwrap();
        assert_eq!(found.title.as_str(), "mine");
    }

    #[tokio::test]
    async fn test_get_note_of_other_user_is_not_found() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(note(5, OWNER, "mine"))));

        let service = NoteService::new(Arc::new(repository));

        let result = service.get_note(STRANGER, NoteId(5)).await;
        assert!(matches!(result, Err(NoteError::NotFound(NoteId(5)))));
    }

    #[tokio::test]
    async fn test_get_note_missing() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = NoteService::new(Arc::new(repository));

        let result = service.get_note(OWNER, NoteId(404)).await;
        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_note_partial() {
        let mut repository = MockTestNoteRepository::new();
        let existing = note(5, OWNER, "old title");
        let created_at = existing.created_at;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|note| note.title.as_str() == "new title" && note.content.as_str() == "body")
            .times(1)
            .returning(|note| Ok(note));

        let service = NoteService::new(Arc::new(repository));

        let command = UpdateNoteCommand {
            title: Some(NoteTitle::new("new title".to_string()).unwrap()),
            content: None,
        };

        let updated = service.update_note(OWNER, NoteId(5), command).await.unwrap();
        assert_eq!(updated.title.as_str(), "new title");
        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);
    }

    #[tokio::test]
    async fn test_update_note_of_other_user_never_writes() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(note(5, OWNER, "mine"))));
        repository.expect_update().times(0);

        let service = NoteService::new(Arc::new(repository));

        let command = UpdateNoteCommand {
            title: None,
            content: Some(NoteContent::new("defaced".to_string()).unwrap()),
        };

        let result = service.update_note(STRANGER, NoteId(5), command).await;
        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_note_success() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(note(5, OWNER, "mine"))));
        repository
            .expect_delete()
            .withf(|id| *id == NoteId(5))
            .times(1)
            .returning(|_| Ok(()));

        let service = NoteService::new(Arc::new(repository));

        assert!(service.delete_note(OWNER, NoteId(5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_note_of_other_user_never_deletes() {
        let mut repository = MockTestNoteRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(note(5, OWNER, "mine"))));
        repository.expect_delete().times(0);

        let service = NoteService::new(Arc::new(repository));

        let result = service.delete_note(STRANGER, NoteId(5)).await;
        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }
}
