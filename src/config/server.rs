//! Server and user reported by the note service profile.

use crate::{Error, Result};

/// The HedgeDoc server and user the CLI is logged into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server base URL, used as the prefix of every note link.
    pub server: String,
    /// Logged-in user name.
    pub user: String,
}

impl ServerConfig {
    /// Creates a validated server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either field is empty.
    pub fn new(server: impl Into<String>, user: impl Into<String>) -> Result<Self> {
        let config = Self {
            server: server.into(),
            user: user.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that both fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::InvalidConfig("server must not be empty".to_string()));
        }
        if self.user.trim().is_empty() {
            return Err(Error::InvalidConfig("user must not be empty".to_string()));
        }
        Ok(())
    }
}
