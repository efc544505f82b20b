use super::EvaluationEngine;
use async_trait::async_trait;
use serde_json::json;

/// Remote engine reached over HTTP.
///
/// Sends `{"expression": ...}` and expects `{"result": "..."}` back.
pub struct HttpEngine {
    pub url: String,
    pub client: reqwest::Client,
}

impl HttpEngine {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EvaluationEngine for HttpEngine {
    async fn evaluate(&self, expression: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .post(&self.url)
            .json(&json!({ "expression": expression }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("engine API error (status {}): {}", status.as_u16(), error_text);
        }

        let body: serde_json::Value = resp.json().await?;
        let text = body
            .get("result")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("engine response missing result"))?
            .to_string();

        Ok(text)
    }

    fn engine_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reads_result_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/eval"))
            .and(body_json(json!({"expression": "sqrt(144)"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "12"})))
            .expect(1)
            .mount(&server)
            .await;

        let engine = HttpEngine::new(format!("{}/eval", server.uri()));
        assert_eq!(engine.evaluate("sqrt(144)").await.unwrap(), "12");
    }

    #[tokio::test]
    async fn server_error_is_engine_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let engine = HttpEngine::new(server.uri());
        let err = engine.evaluate("1 + 1").await.unwrap_err();
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn missing_result_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 2})))
            .mount(&server)
            .await;

        let engine = HttpEngine::new(server.uri());
        let err = engine.evaluate("1 + 1").await.unwrap_err();
        assert!(err.to_string().contains("missing result"));
    }
}
