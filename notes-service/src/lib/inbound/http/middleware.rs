use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the user to request extensions.
///
/// Every failure produces the same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not valid UTF-8 counts as absent.
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user_id = state
        .authenticator
        .gate()
        .authenticate(header)
        .map_err(|_| {
            tracing::warn!(uri = %req.uri(), "Rejected unauthenticated request");
            ApiError::unauthorized()
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(user_id),
    });

    Ok(next.run(req).await)
}
