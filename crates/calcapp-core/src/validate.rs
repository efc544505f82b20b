//! Request validation for `POST /api/evaluate`.
//!
//! Pure functions: no logging, no I/O. Each rejection maps to a fixed
//! [`ValidationError`] whose message is safe to return verbatim.

use serde_json::Value;

use crate::errors::ValidationError;
use crate::model::{EvaluationRequest, MAX_EXPRESSION_CHARS};

/// Decode a raw JSON body and validate it.
pub fn validate_body(body: &[u8]) -> Result<EvaluationRequest, ValidationError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::InvalidPayload)?;
    validate_payload(&payload)
}

/// Validate an already-decoded body: an object with a string `expression`.
pub fn validate_payload(payload: &Value) -> Result<EvaluationRequest, ValidationError> {
    let expression = payload
        .as_object()
        .and_then(|obj| obj.get("expression"))
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidPayload)?;
    validate_expression(expression)
}

/// Strip leading and trailing whitespace, including the byte order mark.
pub fn trim_expression(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Length in UTF-16 code units, the unit the 512 limit is stated in.
pub fn expression_len(expression: &str) -> usize {
    expression.encode_utf16().count()
}

/// Trim and length-check a raw expression. Internal whitespace is preserved.
pub fn validate_expression(raw: &str) -> Result<EvaluationRequest, ValidationError> {
    let trimmed = trim_expression(raw);
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    if expression_len(trimmed) > MAX_EXPRESSION_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(EvaluationRequest::new(trimmed.to_string()))
}
