//! Client side of the HTTP boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::TransportError;

/// Raw reply from `POST /api/evaluate`. Interpretation is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryReply {
    pub status: u16,
    pub body: Value,
}

impl BoundaryReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field, when it is a string.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// The `result` field as text. Missing or null reads as empty; other
    /// scalars are stringified.
    pub fn result_text(&self) -> String {
        match self.body.get("result") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[async_trait]
pub trait EvaluateTransport: Send + Sync {
    async fn post_evaluate(&self, expression: &str) -> Result<BoundaryReply, TransportError>;
}

/// reqwest-backed transport against a calcapp server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Config {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/evaluate", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EvaluateTransport for HttpTransport {
    async fn post_evaluate(&self, expression: &str) -> Result<BoundaryReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "expression": expression }))
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| TransportError::InvalidBody {
                message: e.to_string(),
            })?;

        debug!(status, "boundary replied");
        Ok(BoundaryReply::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn result_text_coerces_like_string() {
        assert_eq!(BoundaryReply::new(200, json!({"result": "6"})).result_text(), "6");
        assert_eq!(BoundaryReply::new(200, json!({"result": 6})).result_text(), "6");
        assert_eq!(BoundaryReply::new(200, json!({"result": null})).result_text(), "");
        assert_eq!(BoundaryReply::new(200, json!({})).result_text(), "");
    }

    #[test]
    fn error_message_requires_string() {
        assert_eq!(
            BoundaryReply::new(400, json!({"error": "Expression is required."})).error_message(),
            Some("Expression is required.")
        );
        assert_eq!(
            BoundaryReply::new(500, json!({"error": {"code": 1}})).error_message(),
            None
        );
    }

    #[tokio::test]
    async fn posts_expression_and_reads_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/evaluate"))
            .and(body_json(json!({"expression": "2 + 2 * 3"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "8"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&format!("{}/", server.uri()), None).unwrap();
        let reply = transport.post_evaluate("2 + 2 * 3").await.unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.result_text(), "8");
    }

    #[tokio::test]
    async fn non_json_body_is_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), None).unwrap();
        let err = transport.post_evaluate("1").await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": "1"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&server.uri(), Some(Duration::from_millis(100))).unwrap();
        let err = transport.post_evaluate("1").await.unwrap_err();
        assert_eq!(err, TransportError::Timeout);
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test hosts.
        let transport = HttpTransport::new("http://127.0.0.1:9", None).unwrap();
        let err = transport.post_evaluate("1").await.unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }
}
