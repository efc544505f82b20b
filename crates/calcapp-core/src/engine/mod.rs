//! Evaluation engine seam.
//!
//! The engine is an external collaborator: it takes a trimmed expression and
//! returns text or fails. Nothing in this crate interprets the grammar.

use async_trait::async_trait;

pub mod command;
pub mod config;
pub mod fake;
pub mod http;

pub use command::CommandEngine;
pub use config::{EngineConfig, EngineKind};
pub use fake::FakeEngine;
pub use http::HttpEngine;

#[async_trait]
pub trait EvaluationEngine: Send + Sync {
    /// Evaluate one expression. Errors carry engine-defined detail.
    async fn evaluate(&self, expression: &str) -> anyhow::Result<String>;

    fn engine_name(&self) -> &'static str;
}
