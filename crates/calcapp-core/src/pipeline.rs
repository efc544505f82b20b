//! Stateless boundary pipeline: validate → delegate → map.

use serde_json::Value;

use crate::delegate::EvaluationDelegate;
use crate::model::EvaluationResult;
use crate::response::{map_outcome, BoundaryResponse, EvaluateError};
use crate::validate::{validate_body, validate_payload};

/// One instance serves any number of concurrent requests; it holds no
/// per-request state.
#[derive(Clone)]
pub struct EvaluateService {
    delegate: EvaluationDelegate,
}

impl EvaluateService {
    pub fn new(delegate: EvaluationDelegate) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &EvaluationDelegate {
        &self.delegate
    }

    /// Handle a raw request body.
    pub async fn handle_body(&self, body: &[u8]) -> BoundaryResponse {
        let outcome = match validate_body(body) {
            Ok(request) => self
                .delegate
                .evaluate(&request)
                .await
                .map_err(EvaluateError::from),
            Err(e) => Err(e.into()),
        };
        map_outcome(outcome)
    }

    /// Handle an already-decoded body.
    pub async fn handle_payload(&self, payload: &Value) -> BoundaryResponse {
        map_outcome(self.run(payload).await)
    }

    async fn run(&self, payload: &Value) -> Result<EvaluationResult, EvaluateError> {
        let request = validate_payload(payload)?;
        Ok(self.delegate.evaluate(&request).await?)
    }
}
