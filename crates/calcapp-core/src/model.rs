//! Request, result and history types shared by the server and the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum expression length after trimming, in UTF-16 code units.
pub const MAX_EXPRESSION_CHARS: usize = 512;

/// Number of entries the history log retains.
pub const HISTORY_CAPACITY: usize = 25;

/// Durable storage key for the persisted history log.
pub const HISTORY_STORAGE_KEY: &str = "calcapp:history";

/// A validated evaluation request.
///
/// Only [`crate::validate`] constructs this, so the expression is always
/// trimmed and within [`MAX_EXPRESSION_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    expression: String,
}

impl EvaluationRequest {
    pub(crate) fn new(expression: String) -> Self {
        Self { expression }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn into_expression(self) -> String {
        self.expression
    }
}

/// Engine output that passed the non-empty check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    result_text: String,
}

impl EvaluationResult {
    pub(crate) fn new(result_text: String) -> Self {
        Self { result_text }
    }

    pub fn text(&self) -> &str {
        &self.result_text
    }

    pub fn into_text(self) -> String {
        self.result_text
    }
}

/// One past evaluation as stored in the history log.
///
/// Field names serialize in camelCase so the persisted array keeps the
/// `{id, expression, result, evaluatedAt}` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: String,
    expression: String,
    result: String,
    evaluated_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry with a fresh random id, stamped with the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::from_parts(
            Uuid::new_v4().to_string(),
            expression,
            result,
            Utc::now(),
        )
    }

    pub fn from_parts(
        id: impl Into<String>,
        expression: impl Into<String>,
        result: impl Into<String>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            expression: expression.into(),
            result: result.into(),
            evaluated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }
}
