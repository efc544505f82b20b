use super::EvaluationEngine;
use anyhow::Context;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs an external calculator once per expression.
///
/// The expression is written to the child's stdin as a single line, never
/// placed in argv, so input like `--help` is data and not an option. No shell
/// is involved. The child is killed if the call is dropped (e.g. on delegate
/// timeout).
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `qalc -t` fed from stdin: terse output, understands natural language input.
    pub fn qalc() -> Self {
        Self::new("qalc", vec!["-t".to_string()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl EvaluationEngine for CommandEngine {
    async fn evaluate(&self, expression: &str) -> anyhow::Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn engine command '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            let line = format!("{}\n", expression.replace(['\r', '\n'], " "));
            match stdin.write_all(line.as_bytes()).await {
                // The exit status below explains an early exit better.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other.context("failed to write expression to engine command")?,
            }
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("engine command '{}' did not complete", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "engine command '{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        let stdout =
            String::from_utf8(output.stdout).context("engine command wrote non-UTF-8 output")?;
        Ok(stdout.trim_end_matches(['\r', '\n']).to_string())
    }

    fn engine_name(&self) -> &'static str {
        "command"
    }
}
