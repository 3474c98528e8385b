//! Result of one mark-lost / mark-found request and its HTTP shape.

use axum::http::StatusCode;
use tracing::error;

use crate::error::LostFoundError;
use crate::types::{FieldError, Handle, LostStatus, RecordReference};

/// Body returned for every successful status change
pub const SUCCESS_BODY: &str = "OK";

/// Body returned for transport failures; the detail only goes to the log
pub const TRANSPORT_FAILURE_BODY: &str = "Something went wrong.";

/// Body returned when the request has no usable handle
pub const MISSING_HANDLE_BODY: &str = "Missing 'handle'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        handle: Handle,
        reference: RecordReference,
        status: LostStatus,
    },
    NotFound {
        handle: Handle,
    },
    ValidationRejected(Vec<FieldError>),
    /// Network error, bad status, malformed or ambiguous store response
    TransportFailure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Validation rejections map to a generic server error rather than 422,
    /// matching what existing callers already handle.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::Success { .. } => StatusCode::OK,
            Outcome::NotFound { .. } => StatusCode::NOT_FOUND,
            Outcome::ValidationRejected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Outcome::TransportFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> String {
        match self {
            Outcome::Success { .. } => SUCCESS_BODY.to_string(),
            Outcome::NotFound { handle } => format!("Pet not found for handle: {handle}"),
            Outcome::ValidationRejected(errors) => {
                let detail = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("Validation failed: {detail}")
            }
            Outcome::TransportFailure(_) => TRANSPORT_FAILURE_BODY.to_string(),
        }
    }
}

impl From<LostFoundError> for Outcome {
    fn from(err: LostFoundError) -> Self {
        match err {
            LostFoundError::ValidationRejected(errors) => Outcome::ValidationRejected(errors),
            LostFoundError::HandleNotFound(handle) => Outcome::NotFound { handle },
            other => {
                let detail = other.to_string();
                error!(error = %detail, "Store call failed");
                Outcome::TransportFailure(detail)
            }
        }
    }
}
