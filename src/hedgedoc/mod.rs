//! HedgeDoc note service access.
//!
//! All server communication goes through the `hedgedoc` CLI binary, run as a
//! blocking subprocess with a fixed timeout. [`NoteService`] is the seam the
//! rest of the crate talks to; [`HedgedocCli`] is its subprocess-backed
//! implementation.

mod client;
mod command;
mod profile;

pub use client::HedgedocCli;
pub use command::{CommandArg, CommandRunner};
pub use profile::parse_profile;

use crate::Result;
use crate::config::ServerConfig;
use crate::models::HistoryEntry;
use secrecy::SecretString;
use std::path::Path;

/// Operations the tool needs from the note service.
pub trait NoteService {
    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the login is rejected.
    fn login(&self, user: &str, password: &SecretString) -> Result<()>;

    /// Returns the raw profile output (`KEY=value` lines).
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read.
    fn profile(&self) -> Result<String>;

    /// Returns the user's note history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be fetched or parsed.
    fn history(&self) -> Result<Vec<HistoryEntry>>;

    /// Deletes the note with this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    fn delete(&self, id: &str) -> Result<()>;

    /// Imports a markdown file as the note with this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails.
    fn import(&self, path: &Path, id: &str) -> Result<()>;
}

/// Reads and validates the server configuration from the profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be read or lacks the server or user.
pub fn get_config(notes: &impl NoteService) -> Result<ServerConfig> {
    let output = notes.profile()?;
    parse_profile(&output)
}
