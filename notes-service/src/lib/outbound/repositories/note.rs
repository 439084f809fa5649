use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NewNote;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteContent;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::ports::NoteRepository;
use crate::domain::user::models::UserId;

pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NoteRow {
    id: i64,
    owner_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: NoteId(row.id),
            owner_id: UserId(row.owner_id),
            title: NoteTitle::new(row.title)?,
            content: NoteContent::new(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> NoteError {
    NoteError::DatabaseError(e.to_string())
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note, NoteError> {
        let result = sqlx::query(
            r#"
            INSERT INTO notes (owner_id, title, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(note.owner_id.0)
        .bind(note.title.as_str())
        .bind(note.content.as_str())
        .bind(note.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(Note {
            id: NoteId(result.last_insert_rowid()),
            owner_id: note.owner_id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.created_at,
        })
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Note::try_from).transpose()
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Note>, NoteError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM notes
            WHERE owner_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Note::try_from).collect()
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = ?2, content = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(note.id.0)
        .bind(note.title.as_str())
        .bind(note.content.as_str())
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(note.id));
        }

        Ok(note)
    }

    async fn delete(&self, id: NoteId) -> Result<(), NoteError> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = ?1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(id));
        }

        Ok(())
    }
}
