use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client settings.
///
/// | Env var | Default |
/// |---------|---------|
/// | `CALCAPP_SERVER_URL` | `http://127.0.0.1:3000` |
/// | `CALCAPP_HISTORY_DIR` | `<data dir>/calcapp` |
/// | `CALCAPP_CLIENT_TIMEOUT_SECS` | `30` (`0` disables) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub history_dir: PathBuf,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_url = std::env::var("CALCAPP_SERVER_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let history_dir = match std::env::var_os("CALCAPP_HISTORY_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_history_dir()?,
        };

        let timeout_secs = match std::env::var("CALCAPP_CLIENT_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CALCAPP_CLIENT_TIMEOUT_SECS must be seconds, got '{raw}'"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            server_url,
            history_dir,
            timeout_secs,
        })
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_history_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.history_dir = dir.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn default_history_dir() -> anyhow::Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("calcapp"))
        .ok_or_else(|| anyhow!("no data directory on this system; set CALCAPP_HISTORY_DIR"))
}
