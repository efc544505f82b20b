//! `engine.evaluate` span contents: structural fields only, never the expression text.

use std::sync::{Arc, Mutex};

use calcapp_core::{validate_expression, EvaluationDelegate, FakeEngine};
use serde_json::Value;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;

const EXPRESSION: &str = "payroll 40000 + 2";

#[derive(Clone)]
struct MockWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl std::io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MockWriter {
    type Writer = MockWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl MockWriter {
    fn output(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

fn setup_capture() -> (MockWriter, tracing::subscriber::DefaultGuard) {
    let writer = MockWriter {
        buf: Arc::new(Mutex::new(Vec::new())),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .finish();

    (writer, tracing::subscriber::set_default(subscriber))
}

/// Fields of the closed `engine.evaluate` span.
fn engine_span(output: &str) -> serde_json::Map<String, Value> {
    output
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line.trim()).ok())
        .filter_map(|v| v.get("span").and_then(Value::as_object).cloned())
        .find(|span| span.get("name").and_then(Value::as_str) == Some("engine.evaluate"))
        .expect("engine.evaluate span was closed")
}

#[tokio::test]
async fn success_span_has_shape_not_text() {
    let (writer, _guard) = setup_capture();
    let delegate =
        EvaluationDelegate::new(Arc::new(FakeEngine::new().with_answer(EXPRESSION, "40002")));

    let req = validate_expression(EXPRESSION).unwrap();
    delegate.evaluate(&req).await.unwrap();

    let output = writer.output();
    assert!(!output.contains("payroll"), "expression leaked: {output}");

    let span = engine_span(&output);
    assert_eq!(span.get("engine").and_then(Value::as_str), Some("fake"));
    assert_eq!(
        span.get("expression_chars").and_then(Value::as_u64),
        Some(EXPRESSION.len() as u64)
    );
    assert_eq!(span.get("outcome").and_then(Value::as_str), Some("ok"));
    assert!(span.contains_key("latency_ms"));
    assert!(!span.contains_key("expression"));
}

#[tokio::test]
async fn failure_span_has_shape_not_text() {
    let (writer, _guard) = setup_capture();
    let delegate = EvaluationDelegate::new(Arc::new(
        FakeEngine::new().with_failure(EXPRESSION, "division by zero"),
    ));

    let req = validate_expression(EXPRESSION).unwrap();
    delegate.evaluate(&req).await.unwrap_err();

    let output = writer.output();
    assert!(!output.contains("payroll"), "expression leaked: {output}");
    assert_eq!(
        engine_span(&output).get("outcome").and_then(Value::as_str),
        Some("error")
    );
}
