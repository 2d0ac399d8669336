//! HTTP error envelope and mapping from domain failures.
//!
//! The domain stays transport agnostic; this module translates [`Error`]
//! values and port errors into Actix responses carrying the trace
//! identifier of the failed request.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::{
    RecommendationRepositoryError, SkillRepositoryError, TrailRepositoryError, UserRepositoryError,
};
use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{TraceId, TRACE_ID_HEADER};

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Wrap a domain failure, capturing the ambient trace identifier.
    pub fn from_domain(error: Error) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: error.details().cloned(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self::from_domain(value)
    }
}

impl From<UserRepositoryError> for ApiError {
    fn from(value: UserRepositoryError) -> Self {
        let error = match value {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::DuplicateEmail { email } => {
                Error::conflict(format!("email {email} is already registered"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        };
        Self::from_domain(error)
    }
}

impl From<SkillRepositoryError> for ApiError {
    fn from(value: SkillRepositoryError) -> Self {
        let error = match value {
            SkillRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("skill repository unavailable: {message}"))
            }
            SkillRepositoryError::DuplicateName { name } => {
                Error::conflict(format!("skill {name} is already declared for this user"))
            }
            SkillRepositoryError::OwnerMissing { user_id } => {
                Error::invalid_request(format!("user {user_id} does not exist"))
            }
            SkillRepositoryError::Query { message } => {
                Error::internal(format!("skill repository error: {message}"))
            }
        };
        Self::from_domain(error)
    }
}

impl From<TrailRepositoryError> for ApiError {
    fn from(value: TrailRepositoryError) -> Self {
        let error = match value {
            TrailRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("trail repository unavailable: {message}"))
            }
            TrailRepositoryError::Query { message } => {
                Error::internal(format!("trail repository error: {message}"))
            }
        };
        Self::from_domain(error)
    }
}

impl From<RecommendationRepositoryError> for ApiError {
    fn from(value: RecommendationRepositoryError) -> Self {
        let error = match value {
            RecommendationRepositoryError::Connection { message } => Error::service_unavailable(
                format!("recommendation repository unavailable: {message}"),
            ),
            RecommendationRepositoryError::DuplicateTitle { title } => {
                Error::conflict(format!("recommendation {title} already exists"))
            }
            RecommendationRepositoryError::Query { message } => {
                Error::internal(format!("recommendation repository error: {message}"))
            }
        };
        Self::from_domain(error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code, ErrorCode::InternalError) {
            error!(message = %self.message, "internal error returned to client");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        // Internal messages stay in the logs; clients get a generic body.
        if matches!(self.code, ErrorCode::InternalError) {
            let mut redacted = self.clone();
            redacted.message = "Internal server error".to_owned();
            redacted.details = None;
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
