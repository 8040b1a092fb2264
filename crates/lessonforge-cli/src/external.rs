//! A [`TextGenerator`] backed by an external shell command.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use lessonforge_core::generator::TextGenerator;

/// Runs `sh -c <command>` per prompt: the prompt goes to stdin, stdout is the reply.
pub struct CommandGenerator {
    command: String,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TextGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.command
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start '{}'", self.command))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that ignores stdin may exit before reading it.
            if let Err(e) = stdin.write_all(prompt.as_bytes()).await {
                tracing::debug!("could not write prompt to '{}': {e}", self.command);
            }
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .with_context(|| format!("'{}' timed out after {:?}", self.command, self.timeout))?
            .with_context(|| format!("failed to run '{}'", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout).context("generator output is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_stdin() {
        let generator = CommandGenerator::new("cat", Duration::from_secs(10));
        let text = generator.generate("1. Q?\nAnswer: A").await.unwrap();
        assert_eq!(text, "1. Q?\nAnswer: A");
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let generator = CommandGenerator::new("sleep 5", Duration::from_millis(50));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("timed out"), "{err:#}");
    }

    #[tokio::test]
    async fn failing_command_is_an_error() {
        let generator = CommandGenerator::new("echo oops >&2; exit 3", Duration::from_secs(10));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("oops"));
    }
}
