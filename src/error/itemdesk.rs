use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, ThisError)]
pub enum ItemdeskError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {message}")]
    InvalidBody {
        status: StatusCode,
        code: &'static str,
        message: String,
        debug_message: String,
    },

    #[error("Item not found: id={id}")]
    NotFound { id: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Upstream error with status {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },
}

impl ItemdeskError {
    pub fn not_found(id: impl ToString) -> Self {
        ItemdeskError::NotFound { id: id.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemdeskError::NotFound { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemdeskError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemdeskError::InvalidBody { status, .. } => *status,
            ItemdeskError::NotFound { .. } => StatusCode::NOT_FOUND,
            ItemdeskError::DatabaseError(_)
            | ItemdeskError::RactorError(_)
            | ItemdeskError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ItemdeskError::ReqwestError(_)
            | ItemdeskError::UrlError(_)
            | ItemdeskError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ItemdeskError {
    fn from(rejection: JsonRejection) -> Self {
        let debug_message = rejection.to_string();
        let rejected_with = rejection.status();
        match rejection {
            JsonRejection::BytesRejection(_) if rejected_with == StatusCode::PAYLOAD_TOO_LARGE => {
                ItemdeskError::InvalidBody {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    code: "PAYLOAD_TOO_LARGE",
                    message: "Request body is too large.".to_string(),
                    debug_message,
                }
            }
            JsonRejection::BytesRejection(_) => ItemdeskError::InvalidBody {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_REQUEST",
                message: "Request body could not be read.".to_string(),
                debug_message,
            },
            JsonRejection::JsonSyntaxError(_) => ItemdeskError::InvalidBody {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_JSON",
                message: "Request body is not valid JSON.".to_string(),
                debug_message,
            },
            _ => ItemdeskError::InvalidBody {
                status: StatusCode::BAD_REQUEST,
                code: "INVALID_REQUEST",
                message: "Request body does not match the expected shape.".to_string(),
                debug_message,
            },
        }
    }
}

impl IntoResponse for ItemdeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_body = match self {
            ItemdeskError::Validation(errors) => ApiErrorObject {
                code: "VALIDATION_ERROR".to_string(),
                message: "Validation error".to_string(),
                details: serde_json::to_value(&errors).ok(),
            },

            ItemdeskError::InvalidBody {
                code,
                message,
                debug_message,
                ..
            } => ApiErrorObject {
                code: code.to_string(),
                message,
                details: Some(Value::String(debug_message)),
            },

            ItemdeskError::NotFound { .. } => ApiErrorObject {
                code: "NOT_FOUND".to_string(),
                message: "Item not found".to_string(),
                details: None,
            },

            ItemdeskError::DatabaseError(_)
            | ItemdeskError::RactorError(_)
            | ItemdeskError::UnexpectedError(_) => {
                error!(error = %self, "internal error while serving request");
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                }
            }

            ItemdeskError::ReqwestError(_)
            | ItemdeskError::UrlError(_)
            | ItemdeskError::UpstreamStatus { .. } => {
                error!(error = %self, "upstream error while serving request");
                ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                    details: None,
                }
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
