use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::note::errors::NoteError;
use crate::domain::note::models::Note;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod create_note;
pub mod delete_note;
pub mod get_current_user;
pub mod get_note;
pub mod list_notes;
pub mod login;
pub mod register;
pub mod update_note;

/// Message returned for every failed identity check.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";
const MALFORMED_BODY_MESSAGE: &str = "Malformed request body";

/// JSON body extractor whose rejections use the API error envelope.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// The single response for any failed identity check.
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }

    /// Log the underlying failure and hide it from the client.
    fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "Request failed");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Deserializer details stay in the logs.
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(INVALID_BODY_MESSAGE.to_string())
            }
            _ => ApiError::BadRequest(MALFORMED_BODY_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            UserError::InvalidEmail(_) | UserError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::PasswordHashing(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(_) => ApiError::NotFound(err.to_string()),
            NoteError::InvalidNoteId(_) => ApiError::BadRequest(err.to_string()),
            NoteError::InvalidTitle(_) | NoteError::InvalidContent(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            NoteError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteData {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteData {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.0,
            title: note.title.as_str().to_string(),
            content: note.content.as_str().to_string(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
