//! Subprocess-backed [`NoteService`].

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

use super::NoteService;
use super::command::{CommandArg, CommandRunner};
use crate::Result;
use crate::models::{HistoryEntry, HistoryPayload};

/// Talks to HedgeDoc through the `hedgedoc` CLI binary.
///
/// | Operation | Invocation |
/// |-----------|------------|
/// | login | `hedgedoc login --email <user> <password>` |
/// | profile | `hedgedoc profile` |
/// | history | `hedgedoc history --json` |
/// | delete | `hedgedoc delete <id>` |
/// | import | `hedgedoc import <path> <id>` |
#[derive(Debug, Clone)]
pub struct HedgedocCli {
    runner: CommandRunner,
}

impl HedgedocCli {
    /// Creates a client for the binary at `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            runner: CommandRunner::new(program, timeout),
        }
    }
}

impl NoteService for HedgedocCli {
    #[instrument(skip(self, password), fields(operation = "hedgedoc.login"))]
    fn login(&self, user: &str, password: &SecretString) -> Result<()> {
        self.runner.run(&[
            CommandArg::Plain("login"),
            CommandArg::Plain("--email"),
            CommandArg::Plain(user),
            CommandArg::Secret(password),
        ])?;
        tracing::debug!("Logged in");
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "hedgedoc.profile"))]
    fn profile(&self) -> Result<String> {
        let out = self.runner.run(&[CommandArg::Plain("profile")])?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[instrument(skip(self), fields(operation = "hedgedoc.history"))]
    fn history(&self) -> Result<Vec<HistoryEntry>> {
        let out = self
            .runner
            .run(&[CommandArg::Plain("history"), CommandArg::Plain("--json")])?;
        HistoryPayload::from_json(&out)
    }

    #[instrument(skip(self), fields(operation = "hedgedoc.delete"))]
    fn delete(&self, id: &str) -> Result<()> {
        let out = self
            .runner
            .run(&[CommandArg::Plain("delete"), CommandArg::Plain(id)])?;
        tracing::debug!(output = %String::from_utf8_lossy(&out).trim(), "Deleted note");
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "hedgedoc.import"))]
    fn import(&self, path: &Path, id: &str) -> Result<()> {
        let out = self.runner.run(&[
            CommandArg::Plain("import"),
            CommandArg::Path(path),
            CommandArg::Plain(id),
        ])?;
        tracing::debug!(output = %String::from_utf8_lossy(&out).trim(), "Imported note");
        Ok(())
    }
}
