use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Errors that can occur during external service communication
#[derive(Debug, PartialEq)]
pub enum ConnectorError {
    /// Request reached the service and was rejected
    HttpError(String),
    /// Service unreachable or timeout
    ServiceUnavailable(String),
    /// Internal error in connector
    Internal(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for ConnectorError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::HttpError(_) => "External service error",
            Self::ServiceUnavailable(_) => "Service unavailable",
            Self::Internal(_) => "Internal error",
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": message,
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::HttpError(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
