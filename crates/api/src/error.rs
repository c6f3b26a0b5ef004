use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dutydesk_services::auth::AuthError;
use dutydesk_services::dao::base::DaoError;
use dutydesk_services::dao::shift::ShiftError;
use dutydesk_services::discord::DiscordError;
use dutydesk_services::erlc::ErlcError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Validation(String),
    /// Game server is online but empty; commands have no recipients.
    EmptyServer,
    /// External API failure. Details are logged at the call site; the
    /// client only gets a generic retry message.
    Upstream,
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "not found: {msg}"),
            ApiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiError::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            ApiError::Forbidden(msg) => write!(f, "forbidden: {msg}"),
            ApiError::Conflict(msg) => write!(f, "conflict: {msg}"),
            ApiError::Validation(msg) => write!(f, "validation: {msg}"),
            ApiError::EmptyServer => write!(f, "empty server"),
            ApiError::Upstream => write!(f, "upstream error"),
            ApiError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::EmptyServer => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "empty_server",
                "No players in server".to_string(),
            ),
            ApiError::Upstream => (
                StatusCode::BAD_GATEWAY,
                "upstream",
                "External service unavailable, try again later".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
            DaoError::Validation(msg) => ApiError::Validation(msg),
            DaoError::Mongo(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonSer(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonDe(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ShiftError> for ApiError {
    fn from(err: ShiftError) -> Self {
        match err {
            ShiftError::AlreadyOnDuty => ApiError::Conflict(err.to_string()),
            ShiftError::NoActiveShift => ApiError::Conflict(err.to_string()),
            ShiftError::Dao(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionExpired => ApiError::Unauthorized("Session expired".to_string()),
            AuthError::InvalidSession(msg) => ApiError::Unauthorized(msg),
        }
    }
}

impl From<ErlcError> for ApiError {
    fn from(err: ErlcError) -> Self {
        match err {
            ErlcError::EmptyServer => ApiError::EmptyServer,
            ErlcError::Unavailable(_) | ErlcError::Rejected { .. } => ApiError::Upstream,
        }
    }
}

impl From<DiscordError> for ApiError {
    fn from(_: DiscordError) -> Self {
        ApiError::Upstream
    }
}
