use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::NoteData;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NoteContent;
use crate::domain::note::models::NoteId;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::models::UpdateNoteCommand;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a note (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateNoteRequest {
    fn try_into_command(self) -> Result<UpdateNoteCommand, NoteError> {
        // Validation happens here - errors are automatically converted via #[from]
        let title = self.title.map(NoteTitle::new).transpose()?;
        let content = self.content.map(NoteContent::new).transpose()?;

        Ok(UpdateNoteCommand { title, content })
    }
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateNoteRequest>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    // Parse note ID and request at HTTP boundary - errors automatically converted
    let note_id = NoteId::from_string(&id).map_err(NoteError::from)?;
    let command = req.try_into_command()?;

    state
        .note_service
        .update_note(current.user_id, note_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}
