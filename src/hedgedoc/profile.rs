//! Parsing of `hedgedoc profile` output.

use crate::Result;
use crate::config::ServerConfig;

const SERVER_KEY: &str = "HEDGEDOC_SERVER=";
const USER_KEY: &str = "USER_NAME=";

/// Extracts the server and user from profile output.
///
/// Lines look like `HEDGEDOC_SERVER=https://md.example.org`; other lines are
/// ignored and the last occurrence of a key wins.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] if either value is missing or empty.
pub fn parse_profile(output: &str) -> Result<ServerConfig> {
    let mut server = String::new();
    let mut user = String::new();

    for line in output.lines() {
        if let Some(value) = line.strip_prefix(SERVER_KEY) {
            value.trim().clone_into(&mut server);
        } else if let Some(value) = line.strip_prefix(USER_KEY) {
            value.trim().clone_into(&mut user);
        }
    }

    ServerConfig::new(server, user)
}
