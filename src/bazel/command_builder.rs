//! Builder for bazel subprocess invocations
//!
//! Every call to bazel goes through [`BazelCommand`] so that program lookup, logging and
//! error mapping are identical for `bazel info` and `bazel query`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::BzlError;

/// Fluent builder for a single bazel invocation.
///
/// ```rust,ignore
/// use bzlcompat::bazel::command_builder::BazelCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = BazelCommand::new("bazel")
///     .args(["query", "//external:*", "--output=proto"])
///     .current_dir("/path/to/workspace")
///     .with_context("listing external repositories")
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// No timeout is applied unless [`with_timeout`](Self::with_timeout) is called.
pub struct BazelCommand {
    /// Program name or path, resolved through `PATH` at execution time
    program: String,

    /// Arguments, starting with the bazel subcommand
    args: Vec<String>,

    /// Working directory (defaults to the current directory)
    current_dir: Option<PathBuf>,

    /// Maximum duration to wait for completion (None = wait indefinitely)
    timeout_duration: Option<Duration>,

    /// Optional context string for log messages
    context: Option<String>,
}

impl BazelCommand {
    /// Creates a builder for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            timeout_duration: None,
            context: None,
        }
    }

    /// Sets the working directory; bazel locates the workspace from it.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets or clears the timeout.
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Adds a context label to log messages.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The command line as it would be typed in a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`BzlError::BazelNotFound`] when the program cannot be resolved
    /// - [`BzlError::BazelCommandError`] on a non-zero exit status or timeout
    pub async fn execute(self) -> Result<BazelCommandOutput> {
        let start = std::time::Instant::now();
        let program = resolve_program(&self.program)?;
        let command_line = self.command_line();

        let mut cmd = Command::new(&program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        match self.context {
            Some(ref ctx) => {
                tracing::debug!(target: "bazel", "({}) Executing command: {}", ctx, command_line);
            }
            None => tracing::debug!(target: "bazel", "Executing command: {}", command_line),
        }

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result.with_context(|| format!("Failed to execute {command_line}"))?
            } else {
                tracing::warn!(
                    target: "bazel",
                    "Command timed out after {} seconds: {}",
                    duration.as_secs(),
                    command_line
                );
                return Err(BzlError::BazelCommandError {
                    command: command_line,
                    code: -1,
                    stderr: format!("timed out after {} seconds", duration.as_secs()),
                }
                .into());
            }
        } else {
            output_future.await.with_context(|| format!("Failed to execute {command_line}"))?
        };

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if !output.status.success() {
            tracing::debug!(
                target: "bazel",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            return Err(BzlError::BazelCommandError {
                command: command_line,
                code: output.status.code().unwrap_or(-1),
                stderr,
            }
            .into());
        }

        if !stderr.is_empty() {
            tracing::trace!(target: "bazel", "{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "bazel::perf",
                "{} took {:.2}s",
                command_line,
                elapsed.as_secs_f64()
            );
        } else {
            tracing::debug!(target: "bazel::perf", "{} took {}ms", command_line, elapsed.as_millis());
        }

        Ok(BazelCommandOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}

/// Output from a bazel command
pub struct BazelCommandOutput {
    /// Raw standard output; binary for `--output=proto`
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl BazelCommandOutput {
    /// Standard output as text.
    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("bazel printed non UTF-8 output")
    }
}

fn resolve_program(program: &str) -> Result<PathBuf, BzlError> {
    which::which(program).map_err(|_| BzlError::BazelNotFound {
        program: program.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let cmd = BazelCommand::new("bazel").arg("query").args(["//external:*", "--output=proto"]);
        assert_eq!(cmd.command_line(), "bazel query //external:* --output=proto");
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = BazelCommand::new("definitely-not-a-bazel-binary-bzlcompat")
            .arg("info")
            .execute()
            .await
            .err()
            .expect("missing program must fail");
        assert!(matches!(
            err.downcast_ref::<BzlError>(),
            Some(BzlError::BazelNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout() {
        let output = BazelCommand::new("sh")
            .args(["-c", "echo release: release 7.0.0"])
            .execute()
            .await
            .unwrap();
        assert_eq!(output.stdout_text().unwrap(), "release: release 7.0.0\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_current_dir() {
        let output = BazelCommand::new("sh")
            .args(["-c", "pwd"])
            .current_dir("/")
            .with_context("cwd check")
            .execute()
            .await
            .unwrap();
        assert_eq!(output.stdout_text().unwrap(), "/\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let err = BazelCommand::new("sh")
            .args(["-c", "sleep 5"])
            .with_timeout(Some(Duration::from_millis(100)))
            .execute()
            .await
            .err()
            .expect("sleep must time out");
        match err.downcast_ref::<BzlError>() {
            Some(BzlError::BazelCommandError { code, stderr, .. }) => {
                assert_eq!(*code, -1);
                assert!(stderr.contains("timed out"));
            }
            _ => panic!("unexpected error: {err:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let temp = tempfile::tempdir().unwrap();
        let marker = temp.path().join("finished");
        let script = format!("sleep 1; touch '{}'", marker.display());

        let result = BazelCommand::new("sh")
            .args(["-c", script.as_str()])
            .with_timeout(Some(Duration::from_millis(100)))
            .execute()
            .await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit() {
        let fake = crate::test_utils::FakeBazel::failing(3, "no workspace").unwrap();
        let err = BazelCommand::new(fake.bazel_path().display().to_string())
            .arg("info")
            .execute()
            .await
            .err()
            .expect("failing bazel must fail");
        match err.downcast_ref::<BzlError>() {
            Some(BzlError::BazelCommandError { code, stderr, .. }) => {
                assert_eq!(*code, 3);
                assert!(stderr.contains("no workspace"));
            }
            _ => panic!("unexpected error: {err:?}"),
        }
    }
}
