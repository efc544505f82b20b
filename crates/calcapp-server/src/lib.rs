//! HTTP boundary for calcapp.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/evaluate` | Evaluate `{"expression": ...}` |
//! | `GET` | `/healthz` | Liveness probe |
//!
//! The handlers are thin: validation, delegation and masking all live in
//! [`calcapp_core::EvaluateService`].

pub mod config;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use routes::router;

use std::future::Future;

use calcapp_core::{EvaluateService, EvaluationDelegate};
use tokio::net::TcpListener;
use tracing::info;

/// Build the boundary service described by `config`.
pub fn build_service(config: &ServerConfig) -> anyhow::Result<EvaluateService> {
    let engine = config.engine.build()?;
    let delegate = EvaluationDelegate::new(engine).with_timeout(config.engine.timeout());
    info!(
        engine = delegate.engine_name(),
        timeout_secs = config.engine.timeout_secs,
        "evaluation engine configured"
    );
    Ok(EvaluateService::new(delegate))
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    service: EvaluateService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
