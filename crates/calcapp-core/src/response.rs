//! Boundary response mapping.
//!
//! This is the ONLY place where pipeline outcomes become caller-visible text.
//! Each failure kind has one fixed external message; engine detail goes to the
//! diagnostic log and nowhere else.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::{DelegationError, ValidationError};
use crate::model::EvaluationResult;

/// External message for every delegation failure, whatever the cause.
pub const DELEGATION_FAILURE_MESSAGE: &str = "Unable to evaluate expression at this time.";

/// Failure of one boundary request.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Delegation(#[from] DelegationError),
}

impl EvaluateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Delegation(_) => FailureKind::Delegation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Delegation,
}

impl FailureKind {
    pub fn status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Delegation => 500,
        }
    }
}

/// Caller-safe error produced at the boundary. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub kind: FailureKind,
}

impl ErrorResponse {
    /// Apply the masking table. Logs delegation detail as a side effect.
    pub fn from_error(err: &EvaluateError) -> Self {
        let message = match err {
            EvaluateError::Validation(v) => {
                debug!(reason = %v, "evaluation request rejected");
                v.to_string()
            }
            EvaluateError::Delegation(d) => {
                error!(engine = d.engine(), error = %d, "evaluation failed");
                DELEGATION_FAILURE_MESSAGE.to_string()
            }
        };
        Self {
            message,
            kind: err.kind(),
        }
    }
}

/// JSON body of `POST /api/evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Result { result: String },
    Error { error: String },
}

/// Status code plus body, independent of the HTTP framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl From<ErrorResponse> for BoundaryResponse {
    fn from(err: ErrorResponse) -> Self {
        Self {
            status: err.kind.status(),
            body: ResponseBody::Error { error: err.message },
        }
    }
}

pub fn map_outcome(outcome: Result<EvaluationResult, EvaluateError>) -> BoundaryResponse {
    match outcome {
        Ok(result) => BoundaryResponse {
            status: 200,
            body: ResponseBody::Result {
                result: result.into_text(),
            },
        },
        Err(err) => ErrorResponse::from_error(&err).into(),
    }
}
