use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterUserCommand::new(email, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
