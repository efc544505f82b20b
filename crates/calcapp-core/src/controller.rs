//! Client-side orchestration of one evaluation at a time.
//!
//! ```text
//! Idle ──submit()──▶ Evaluating ──reply──▶ Idle
//!   ▲                    │
//!   └── submit() ignored ┘ (blank expression, or already Evaluating)
//! ```
//!
//! The `Evaluating` state is the only concurrency guard. The session mutex
//! is held for bookkeeping only, never across the network call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::errors::TransportError;
use crate::history::{HistoryStore, Persistence};
use crate::model::HistoryEntry;
use crate::notify::Notifier;
use crate::transport::{BoundaryReply, EvaluateTransport};
use crate::validate::trim_expression;

pub const EMPTY_RESPONSE_MESSAGE: &str = "Received an empty response.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong while evaluating the expression.";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Unable to evaluate expression.";
pub const HISTORY_CLEARED_MESSAGE: &str = "History cleared.";
pub const HISTORY_NOT_SAVED_MESSAGE: &str =
    "History could not be saved; it is kept for this session only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Evaluating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankExpression,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Result set and recorded in history.
    Evaluated(HistoryEntry),
    /// Failure message already sent to the notifier.
    Failed(String),
    /// Nothing happened.
    Ignored(IgnoreReason),
}

struct Session {
    state: ControllerState,
    expression: String,
    result: Option<String>,
    history: HistoryStore,
}

pub struct SubmissionController {
    transport: Arc<dyn EvaluateTransport>,
    notifier: Arc<dyn Notifier>,
    session: Mutex<Session>,
}

impl SubmissionController {
    /// The history store is taken as-is; call [`Self::hydrate`] once the
    /// runtime is ready for storage access.
    pub fn new(
        transport: Arc<dyn EvaluateTransport>,
        notifier: Arc<dyn Notifier>,
        history: HistoryStore,
    ) -> Self {
        Self {
            transport,
            notifier,
            session: Mutex::new(Session {
                state: ControllerState::Idle,
                expression: String::new(),
                result: None,
                history,
            }),
        }
    }

    pub fn hydrate(&self) {
        let persistence = self.session().history.hydrate();
        self.report(&persistence);
    }

    pub fn set_expression(&self, expression: impl Into<String>) {
        self.session().expression = expression.into();
    }

    pub fn expression(&self) -> String {
        self.session().expression.clone()
    }

    pub fn result(&self) -> Option<String> {
        self.session().result.clone()
    }

    pub fn state(&self) -> ControllerState {
        self.session().state
    }

    /// Snapshot of the history log, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.session().history.entries().to_vec()
    }

    /// Evaluate the current expression through the boundary.
    pub async fn submit(&self) -> SubmitOutcome {
        let expression = match self.begin() {
            Ok(expression) => expression,
            Err(reason) => {
                debug!(?reason, "submission ignored");
                return SubmitOutcome::Ignored(reason);
            }
        };

        let in_flight = InFlight {
            session: &self.session,
            armed: true,
        };
        let reply = self.transport.post_evaluate(&expression).await;
        in_flight.disarm();

        self.complete(expression, reply)
    }

    /// Replay a past evaluation without a network call or a new history entry.
    pub fn select_history(&self, id: &str) -> Option<HistoryEntry> {
        let mut session = self.session();
        let entry = session.history.select(id).cloned()?;
        session.expression = entry.expression().to_string();
        session.result = Some(entry.result().to_string());
        Some(entry)
    }

    pub fn clear_history(&self) {
        let persistence = self.session().history.clear();
        self.report(&persistence);
        self.notifier.success(HISTORY_CLEARED_MESSAGE);
    }

    fn begin(&self) -> Result<String, IgnoreReason> {
        let mut session = self.session();
        let trimmed = trim_expression(&session.expression);
        if trimmed.is_empty() {
            return Err(IgnoreReason::BlankExpression);
        }
        if session.state == ControllerState::Evaluating {
            return Err(IgnoreReason::Busy);
        }
        let expression = trimmed.to_string();
        session.state = ControllerState::Evaluating;
        Ok(expression)
    }

    fn complete(
        &self,
        expression: String,
        reply: Result<BoundaryReply, TransportError>,
    ) -> SubmitOutcome {
        let outcome = interpret(reply);

        let mut session = self.session();
        session.state = ControllerState::Idle;

        match outcome {
            Ok(result) => {
                session.result = Some(result.clone());
                let entry = HistoryEntry::new(expression, result);
                let persistence = session.history.append(entry.clone());
                drop(session);

                info!(entry_id = entry.id(), "evaluation recorded");
                self.report(&persistence);
                SubmitOutcome::Evaluated(entry)
            }
            Err(message) => {
                drop(session);
                self.notifier.error(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn report(&self, persistence: &Persistence) {
        if persistence.warning().is_some() {
            self.notifier.warning(HISTORY_NOT_SAVED_MESSAGE);
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the controller to `Idle` if a submission is dropped mid-call.
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("evaluation abandoned before a reply arrived");
            lock(self.session).state = ControllerState::Idle;
        }
    }
}

/// Turn a boundary reply into result text or a user-facing message.
fn interpret(reply: Result<BoundaryReply, TransportError>) -> Result<String, String> {
    let reply = reply.map_err(|e| {
        warn!(error = %e, "evaluate request failed");
        TRANSPORT_ERROR_MESSAGE.to_string()
    })?;

    if !reply.is_success() {
        return Err(reply
            .error_message()
            .unwrap_or(FALLBACK_ERROR_MESSAGE)
            .to_string());
    }

    let text = reply.result_text().trim().to_string();
    if text.is_empty() {
        return Err(EMPTY_RESPONSE_MESSAGE.to_string());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interpret_success_trims_result() {
        let reply = BoundaryReply::new(200, json!({"result": "  42 \n"}));
        assert_eq!(interpret(Ok(reply)), Ok("42".to_string()));
    }

    #[test]
    fn interpret_error_prefers_server_message() {
        let reply = BoundaryReply::new(400, json!({"error": "Expression is too long."}));
        assert_eq!(
            interpret(Ok(reply)),
            Err("Expression is too long.".to_string())
        );

        let reply = BoundaryReply::new(502, json!({"detail": "gateway"}));
        assert_eq!(interpret(Ok(reply)), Err(FALLBACK_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn interpret_blank_success_is_failure() {
        for body in [json!({"result": ""}), json!({"result": "   "}), json!({})] {
            assert_eq!(
                interpret(Ok(BoundaryReply::new(200, body))),
                Err(EMPTY_RESPONSE_MESSAGE.to_string())
            );
        }
    }

    #[test]
    fn interpret_transport_error_is_generic() {
        let err = TransportError::Network {
            message: "connection refused 10.0.0.7:3000".to_string(),
        };
        assert_eq!(interpret(Err(err)), Err(TRANSPORT_ERROR_MESSAGE.to_string()));
    }
}
