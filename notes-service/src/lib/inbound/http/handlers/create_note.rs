use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::NoteData;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::CreateNoteCommand;
use crate::domain::note::models::NoteContent;
use crate::domain::note::models::NoteTitle;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_note(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreateNoteRequest>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .note_service
        .create_note(current.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::CREATED, note.into()))
}

/// HTTP request body for creating a note (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateNoteRequest {
    title: String,
    #[serde(default)]
    content: String,
}

impl CreateNoteRequest {
    fn try_into_command(self) -> Result<CreateNoteCommand, NoteError> {
        Ok(CreateNoteCommand {
            title: NoteTitle::new(self.title)?,
            content: NoteContent::new(self.content)?,
        })
    }
}
