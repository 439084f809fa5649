use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = LoginCommand {
        email: body.email,
        password: body.password,
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AccessToken> for LoginResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type.to_string(),
            expires_in: token.expires_in,
        }
    }
}
