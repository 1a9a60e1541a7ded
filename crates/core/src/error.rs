use thiserror::Error;

/// Errors relayed back to HTTP callers.
///
/// Every failure coming out of a gateway is folded into one of these
/// variants. AWS exceptions without a closer match end up in `Upstream`,
/// which keeps the AWS error code and message intact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Access denied: {0}")]
    Forbidden(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("{operation} failed: {message}")]
    Upstream {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },
}

impl ServiceError {
    /// Shorthand for an `Upstream` error without an AWS error code.
    pub fn upstream(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            operation,
            code: None,
            message: message.into(),
        }
    }

    /// Machine-readable code used in raw error bodies.
    ///
    /// Upstream errors report the AWS error code when one was returned.
    pub fn code(&self) -> &str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::InvalidInput(_) => "InvalidInput",
            Self::Forbidden(_) => "Forbidden",
            Self::Throttled(_) => "Throttled",
            Self::Unavailable(_) => "Unavailable",
            Self::Upstream { code, .. } => code.as_deref().unwrap_or("UpstreamError"),
        }
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
