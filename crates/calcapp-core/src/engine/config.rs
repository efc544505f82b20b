use super::{CommandEngine, EvaluationEngine, FakeEngine, HttpEngine};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Which engine implementation the server delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Command,
    Http,
    Fake,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "http" => Ok(Self::Http),
            "fake" => Ok(Self::Fake),
            other => Err(format!(
                "unknown engine '{}' (expected command, http or fake)",
                other
            )),
        }
    }
}

/// Engine selection and delegation deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub kind: EngineKind,

    /// Program for the command engine.
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments placed before the expression.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Endpoint for the http engine.
    #[serde(default)]
    pub url: Option<String>,

    /// Per-call deadline in seconds; `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_command() -> String {
    "qalc".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-t".to_string()]
}

fn default_timeout() -> u64 {
    10
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            command: default_command(),
            args: default_args(),
            url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CALCAPP_ENGINE` | `command`, `http` or `fake` |
    /// | `CALCAPP_ENGINE_COMMAND` | Program for the command engine |
    /// | `CALCAPP_ENGINE_URL` | Endpoint for the http engine |
    /// | `CALCAPP_ENGINE_TIMEOUT_SECS` | Per-call deadline |
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Override fields that are set in the environment.
    pub fn merge_env(mut self) -> Self {
        if let Some(kind) = std::env::var("CALCAPP_ENGINE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.kind = kind;
        }
        if let Ok(command) = std::env::var("CALCAPP_ENGINE_COMMAND") {
            self.command = command;
        }
        if let Ok(url) = std::env::var("CALCAPP_ENGINE_URL") {
            self.url = Some(url);
        }
        if let Some(secs) = std::env::var("CALCAPP_ENGINE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn with_kind(mut self, kind: EngineKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_command(mut self, command: impl Into<String>, args: Vec<String>) -> Self {
        self.command = command.into();
        self.args = args;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Instantiate the configured engine.
    pub fn build(&self) -> anyhow::Result<Arc<dyn EvaluationEngine>> {
        let engine: Arc<dyn EvaluationEngine> = match self.kind {
            EngineKind::Command => Arc::new(CommandEngine::new(
                self.command.clone(),
                self.args.clone(),
            )),
            EngineKind::Http => {
                let url = self
                    .url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| anyhow::anyhow!("http engine requires an engine url"))?;
                Arc::new(HttpEngine::new(url))
            }
            EngineKind::Fake => Arc::new(FakeEngine::demo()),
        };
        Ok(engine)
    }
}
