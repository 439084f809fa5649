use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::NoteData;
use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_note(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
) -> Result<ApiSuccess<NoteData>, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;

    state
        .note_service
        .get_note(current.user_id, note_id)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}
