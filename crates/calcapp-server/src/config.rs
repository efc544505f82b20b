//! Server configuration: YAML file, then environment, then CLI flags.

use std::path::Path;

use calcapp_core::EngineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config '{path}': {message}")]
    Parse { path: String, message: String },
}

/// ```yaml
/// bind: 0.0.0.0:3000
/// engine:
///   kind: http
///   url: http://engine.internal/eval
///   timeout_secs: 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Override fields set in the environment (`CALCAPP_BIND`, `CALCAPP_ENGINE*`).
    pub fn merge_env(mut self) -> Self {
        if let Ok(bind) = std::env::var("CALCAPP_BIND") {
            self.bind = bind;
        }
        self.engine = self.engine.merge_env();
        self
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use calcapp_core::EngineKind;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn yaml_fills_defaults() {
        let cfg = ServerConfig::from_yaml("engine:\n  kind: fake\n").unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:3000");
        assert_eq!(cfg.engine.kind, EngineKind::Fake);
        assert_eq!(cfg.engine.timeout_secs, 10);

        assert_eq!(ServerConfig::from_yaml("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn bad_yaml_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "engine: [unclosed").unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(&file.path().display().to_string()), "got: {msg}");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/calcapp.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        unsafe {
            std::env::set_var("CALCAPP_BIND", "0.0.0.0:8080");
            std::env::set_var("CALCAPP_ENGINE", "http");
            std::env::set_var("CALCAPP_ENGINE_URL", "http://engine/eval");
        }
        let cfg = ServerConfig::from_yaml("bind: 127.0.0.1:1\n")
            .unwrap()
            .merge_env();
        unsafe {
            std::env::remove_var("CALCAPP_BIND");
            std::env::remove_var("CALCAPP_ENGINE");
            std::env::remove_var("CALCAPP_ENGINE_URL");
        }

        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.engine.kind, EngineKind::Http);
        assert_eq!(cfg.engine.url.as_deref(), Some("http://engine/eval"));
    }
}
