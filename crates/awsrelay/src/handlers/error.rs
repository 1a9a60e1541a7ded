//! Error relay for the AWS routes.
//!
//! Each route family answers failures with its own body shape. The shapes
//! are part of the HTTP contract and callers already depend on them:
//!
//! - `/dynamo-test/{guid}`: the literal `BOOM`
//! - `/dynamo-test` and `/dynamo-test/tables`: `{"message": "..."}`
//! - `/publish/topics...`: the error message as plain text
//! - `/queues...`: `{"code": "...", "message": "...", "statusCode": n}`
//!
//! The status code always comes from [`service_error_to_status_code`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use awsrelay_core::{service_error_to_status_code, ServiceError};

/// Body shape used when relaying an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStyle {
    /// A fixed text body, whatever the error.
    Literal(&'static str),
    /// `{"message": "<error>"}`.
    MessageObject,
    /// The error message as `text/plain`.
    Text,
    /// `{"code", "message", "statusCode"}`.
    ErrorObject,
}

/// A service error on its way back to the caller.
#[derive(Debug)]
pub struct RelayError {
    pub error: ServiceError,
    pub style: RelayStyle,
}

impl RelayError {
    pub fn new(error: ServiceError, style: RelayStyle) -> Self {
        Self { error, style }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(service_error_to_status_code(&self.error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Folds an extractor rejection (bad JSON body, bad query string) into
/// `InvalidInput` so it is relayed like any other failure of the route.
pub fn rejected(rejection: impl std::fmt::Display) -> ServiceError {
    ServiceError::InvalidInput(rejection.to_string())
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorObject<'a> {
    code: &'a str,
    message: String,
    status_code: u16,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self.error, status = status.as_u16(), "AWS call failed");
        } else {
            tracing::warn!(error = %self.error, status = status.as_u16(), "Request rejected");
        }

        match self.style {
            RelayStyle::Literal(text) => (status, text).into_response(),
            RelayStyle::MessageObject => (
                status,
                Json(MessageBody {
                    message: self.error.to_string(),
                }),
            )
                .into_response(),
            RelayStyle::Text => (status, self.error.to_string()).into_response(),
            RelayStyle::ErrorObject => (
                status,
                Json(ErrorObject {
                    code: self.error.code(),
                    message: self.error.to_string(),
                    status_code: status.as_u16(),
                }),
            )
                .into_response(),
        }
    }
}
