use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let note_id = NoteId::from_string(&id).map_err(NoteError::from)?;

    state
        .note_service
        .delete_note(current.user_id, note_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
