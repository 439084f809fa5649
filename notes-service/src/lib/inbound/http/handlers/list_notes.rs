use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::NoteData;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_notes(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<NoteData>>, ApiError> {
    state
        .note_service
        .list_notes(current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|notes| ApiSuccess::new(StatusCode::OK, notes.iter().map(NoteData::from).collect()))
}
