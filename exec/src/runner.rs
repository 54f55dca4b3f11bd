//! Subprocess execution with separate stdout/stderr capture.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Output captured from one tool invocation.
///
/// Ephemeral: produced per execution and consumed immediately by the owning
/// adapter's parser. stdout and stderr are kept separate because tool
/// grammars depend on which stream a line came from.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code when the process terminated normally. Lint tools routinely
    /// exit nonzero when they found diagnostics, so this is informational.
    pub exit_code: Option<i32>,
}

/// Error spawning or waiting on an external tool.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The executable could not be spawned at all. Surfaced to the user as
    /// a configuration problem rather than a lint result.
    #[error("executable not found: {program}")]
    NotFound { program: String },
    #[error("tool {program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },
}

/// Runs external lint tools and captures their output.
///
/// Holds no state across invocations. A timeout is injectable for callers
/// that want one; these tools are fast static analyzers, so the default is
/// to wait for exit.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Run `program` with `args`, capturing stdout and stderr separately.
    ///
    /// A nonzero exit code is not an error; the captured output is the
    /// result either way.
    pub async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<CapturedOutput, ExecError> {
        let program_name = program.display().to_string();

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        tracing::debug!(program = %program_name, ?args, "spawning lint tool");

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExecError::NotFound {
                    program: program_name.clone(),
                }
            } else {
                ExecError::Io {
                    program: program_name.clone(),
                    source: e,
                }
            }
        })?;

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                // wait_with_output owns the child; dropping the future on
                // timeout triggers kill_on_drop.
                Err(_) => {
                    return Err(ExecError::Timeout {
                        program: program_name,
                        timeout: limit,
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|e| ExecError::Io {
            program: program_name,
            source: e,
        })?;

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
