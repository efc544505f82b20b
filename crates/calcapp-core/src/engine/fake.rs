use super::EvaluationEngine;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Table-driven engine for tests and offline demos.
///
/// Unknown expressions fail, like a real engine rejecting unparsable input.
#[derive(Debug, Default)]
pub struct FakeEngine {
    answers: HashMap<String, String>,
    failures: HashMap<String, String>,
    calls: AtomicUsize,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handful of answers matching the built-in example expressions.
    pub fn demo() -> Self {
        Self::new()
            .with_answer("2 + 2 * 3", "8")
            .with_answer("sqrt(144)", "12")
            .with_answer("square root of 144", "12")
            .with_answer("10^3", "1000")
            .with_answer("abs(-42)", "42")
            .with_answer("25 plus 17", "42")
            .with_answer("10% of 5", "0.5")
            .with_answer("log(100)", "2")
            .with_answer("sin(pi / 2)", "1")
    }

    pub fn with_answer(mut self, expression: impl Into<String>, result: impl Into<String>) -> Self {
        self.answers.insert(expression.into(), result.into());
        self
    }

    pub fn with_failure(
        mut self,
        expression: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failures.insert(expression.into(), message.into());
        self
    }

    /// Number of `evaluate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvaluationEngine for FakeEngine {
    async fn evaluate(&self, expression: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failures.get(expression) {
            anyhow::bail!("{}", message);
        }
        match self.answers.get(expression) {
            Some(result) => Ok(result.clone()),
            None => anyhow::bail!("unsupported expression"),
        }
    }

    fn engine_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_failures_and_unknowns() {
        let engine = FakeEngine::new()
            .with_answer("1 + 1", "2")
            .with_failure("sqrt(-1)", "domain error");

        assert_eq!(engine.evaluate("1 + 1").await.unwrap(), "2");
        assert_eq!(
            engine.evaluate("sqrt(-1)").await.unwrap_err().to_string(),
            "domain error"
        );
        assert!(engine.evaluate("???").await.is_err());
        assert_eq!(engine.calls(), 3);
    }
}
