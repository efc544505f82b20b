//! Delegation of validated expressions to the evaluation engine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info_span, Instrument};

use crate::engine::EvaluationEngine;
use crate::errors::DelegationError;
use crate::model::{EvaluationRequest, EvaluationResult};

/// Calls the engine exactly once per request. No retry, no caching.
///
/// Every engine failure comes back as a [`DelegationError`]; a blank engine
/// answer is a failure too. Non-blank text is passed through untouched.
#[derive(Clone)]
pub struct EvaluationDelegate {
    engine: Arc<dyn EvaluationEngine>,
    timeout: Option<Duration>,
}

impl EvaluationDelegate {
    pub fn new(engine: Arc<dyn EvaluationEngine>) -> Self {
        Self {
            engine,
            timeout: None,
        }
    }

    /// Fail calls that take longer than `timeout`. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.engine_name()
    }

    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, DelegationError> {
        let engine = self.engine.engine_name();
        // Expression text stays out of span fields.
        let span = info_span!(
            "engine.evaluate",
            engine,
            expression_chars = request.expression().chars().count(),
            latency_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        async move {
            let started = Instant::now();
            let call = self.engine.evaluate(request.expression());

            let raw = match self.timeout {
                Some(timeout) => match tokio::time::timeout(timeout, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        record(started, "timeout");
                        return Err(DelegationError::Timeout { engine, timeout });
                    }
                },
                None => call.await,
            };

            let result = match raw {
                Ok(text) if text.trim().is_empty() => Err(DelegationError::EmptyResult { engine }),
                Ok(text) => Ok(EvaluationResult::new(text)),
                Err(e) => Err(DelegationError::Engine {
                    engine,
                    message: format!("{:#}", e),
                }),
            };

            record(started, if result.is_ok() { "ok" } else { "error" });
            result
        }
        .instrument(span)
        .await
    }
}

fn record(started: Instant, outcome: &str) {
    let span = tracing::Span::current();
    span.record("latency_ms", started.elapsed().as_millis() as u64);
    span.record("outcome", outcome);
}
