//! Blocking subprocess execution with a timeout.

use secrecy::{ExposeSecret, SecretString};
use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

use crate::{Error, Result};

type PipeReader = Receiver<std::io::Result<Vec<u8>>>;

/// Placeholder shown instead of secret arguments in logs and errors.
const REDACTED: &str = "********";

/// One command-line argument.
#[derive(Debug, Clone, Copy)]
pub enum CommandArg<'a> {
    /// A plain text argument.
    Plain(&'a str),
    /// A filesystem path.
    Path(&'a Path),
    /// A secret, passed to the process but never displayed.
    Secret(&'a SecretString),
}

impl CommandArg<'_> {
    fn as_os_str(&self) -> &OsStr {
        match self {
            Self::Plain(s) => OsStr::new(s),
            Self::Path(p) => p.as_os_str(),
            Self::Secret(s) => OsStr::new(s.expose_secret()),
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Plain(s) => (*s).to_string(),
            Self::Path(p) => p.display().to_string(),
            Self::Secret(_) => REDACTED.to_string(),
        }
    }
}

/// Runs one program with a per-invocation timeout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    /// Program to execute.
    program: PathBuf,
    /// Maximum run time of a single invocation.
    timeout: Duration,
}

impl CommandRunner {
    /// Creates a runner for `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Returns the command line with secrets redacted.
    #[must_use]
    pub fn describe(&self, args: &[CommandArg<'_>]) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(args.iter().map(CommandArg::display))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the program and returns its standard output.
    ///
    /// Output pipes are drained on helper threads so a large payload cannot
    /// stall the child. The timeout bounds both the child and the draining of
    /// its pipes, which a background grandchild may keep open. On timeout the
    /// child is killed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] on a non-zero exit,
    /// [`Error::CommandTimeout`] when the timeout elapses, and
    /// [`Error::OperationFailed`] if the process cannot be started.
    pub fn run(&self, args: &[CommandArg<'_>]) -> Result<Vec<u8>> {
        let command = self.describe(args);
        tracing::info!(command = %command, "Running command");
        let deadline = Instant::now() + self.timeout;

        let mut child = Command::new(&self.program)
            .args(args.iter().map(CommandArg::as_os_str))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::OperationFailed {
                operation: "spawn_command".to_string(),
                cause: format!("{command}: {e}"),
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.timed_out(command));
            },
            Err(e) => {
                let _ = child.kill();
                return Err(Error::OperationFailed {
                    operation: "wait_command".to_string(),
                    cause: format!("{command}: {e}"),
                });
            },
        };

        let stdout = self.collect(stdout, deadline, &command)?;
        let stderr = self.collect(stderr, deadline, &command)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            tracing::error!(
                command = %command,
                status = ?status.code(),
                stderr = %stderr,
                "Command failed"
            );
            return Err(Error::CommandFailed {
                command,
                status: status
                    .code()
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
                stderr,
            });
        }

        tracing::trace!(command = %command, bytes = stdout.len(), "Command finished");
        Ok(stdout)
    }

    /// Waits for a pipe reader until `deadline`.
    fn collect(
        &self,
        reader: Option<PipeReader>,
        deadline: Instant,
        command: &str,
    ) -> Result<Vec<u8>> {
        let Some(reader) = reader else {
            return Ok(Vec::new());
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        match reader.recv_timeout(remaining) {
            Ok(output) => output.map_err(|e| Error::OperationFailed {
                operation: "read_command_output".to_string(),
                cause: format!("{command}: {e}"),
            }),
            Err(RecvTimeoutError::Timeout) => Err(self.timed_out(command.to_string())),
            Err(RecvTimeoutError::Disconnected) => Err(Error::OperationFailed {
                operation: "read_command_output".to_string(),
                cause: format!("{command}: reader thread exited"),
            }),
        }
    }

    fn timed_out(&self, command: String) -> Error {
        tracing::error!(command = %command, timeout = ?self.timeout, "Command timed out");
        Error::CommandTimeout {
            command,
            timeout_secs: self.timeout.as_secs(),
        }
    }
}

/// Reads a pipe to the end on a helper thread.
///
/// The thread is detached; it finishes once every holder of the pipe has
/// closed it.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
            let _ = tx.send(result);
        });
        rx
    })
}
