//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line flags override per invocation.

mod server;

pub use server::ServerConfig;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default name of the `hedgedoc` CLI binary, resolved on `PATH`.
pub const DEFAULT_PROGRAM: &str = "hedgedoc";
/// Default taxonomy file, relative to the working directory.
pub const DEFAULT_STRUCTURE_PATH: &str = "hd.structure.yaml";
/// Default output file for the generated document.
pub const DEFAULT_OUTPUT_PATH: &str = "out.md";
/// Default timeout for each `hedgedoc` invocation.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 15;

/// Environment variable overriding the `hedgedoc` binary.
pub const ENV_PROGRAM: &str = "HD_HISTORY_PROGRAM";
/// Environment variable overriding the taxonomy file.
pub const ENV_STRUCTURE: &str = "HD_HISTORY_STRUCTURE";
/// Environment variable overriding the reference document id.
pub const ENV_REFERENCE_ID: &str = "HD_HISTORY_REFERENCE_ID";

/// Main configuration for hedgedoc-history.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path or name of the `hedgedoc` binary.
    pub program: PathBuf,
    /// Timeout applied to every `hedgedoc` invocation.
    pub command_timeout: Duration,
    /// Taxonomy file.
    pub structure_path: PathBuf,
    /// Output file for the generated document.
    pub output_path: PathBuf,
    /// Id of the published reference document, if any.
    pub reference_id: Option<String>,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// `hedgedoc` CLI section.
    pub hedgedoc: Option<ConfigFileHedgedoc>,
    /// Reference document section.
    pub reference: Option<ConfigFileReference>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// `hedgedoc` section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHedgedoc {
    /// Path or name of the binary.
    pub program: Option<String>,
    /// Per-command timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Reference section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileReference {
    /// Taxonomy file.
    pub structure: Option<String>,
    /// Output file.
    pub output: Option<String>,
    /// Published reference document id.
    pub id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
            structure_path: PathBuf::from(DEFAULT_STRUCTURE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            reference_id: None,
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if the text is not a valid
    /// config file.
    pub fn from_toml_str(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| crate::Error::InvalidConfig(format!("config file: {e}")))?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir first, then `~/.config/hedgedoc-history/`.
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs
            .config_dir()
            .join("hedgedoc-history")
            .join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("hedgedoc-history")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `AppConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(hedgedoc) = file.hedgedoc {
            if let Some(program) = hedgedoc.program {
                config.program = PathBuf::from(program);
            }
            if let Some(secs) = hedgedoc.timeout_secs {
                config.command_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(reference) = file.reference {
            if let Some(structure) = reference.structure {
                config.structure_path = PathBuf::from(structure);
            }
            if let Some(output) = reference.output {
                config.output_path = PathBuf::from(output);
            }
            config.reference_id = reference.id;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an environment lookup. Blank values are ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(program) = var(ENV_PROGRAM) {
            self.program = PathBuf::from(program);
        }
        if let Some(structure) = var(ENV_STRUCTURE) {
            self.structure_path = PathBuf::from(structure);
        }
        if let Some(id) = var(ENV_REFERENCE_ID) {
            self.reference_id = Some(id);
        }
        self
    }

    /// Resolves the reference id, preferring an explicit value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if no id is configured anywhere.
    pub fn reference_id_or(&self, explicit: Option<String>) -> crate::Result<String> {
        explicit
            .or_else(|| self.reference_id.clone())
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::InvalidConfig(format!(
                    "no reference id; pass --reference-id, set {ENV_REFERENCE_ID} or reference.id"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.program, PathBuf::from("hedgedoc"));
        assert_eq!(config.command_timeout, Duration::from_secs(15));
        assert_eq!(config.structure_path, PathBuf::from("hd.structure.yaml"));
        assert_eq!(config.output_path, PathBuf::from("out.md"));
        assert!(config.reference_id.is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
[hedgedoc]
program = "/home/me/.local/bin/hedgedoc"
timeout_secs = 30

[reference]
structure = "tags.yaml"
id = "l1U9OB_cQJK0G2mjGa12Bg"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.program, PathBuf::from("/home/me/.local/bin/hedgedoc"));
        assert_eq!(config.command_timeout, Duration::from_secs(30));
        assert_eq!(config.structure_path, PathBuf::from("tags.yaml"));
        assert_eq!(config.output_path, PathBuf::from("out.md"));
        assert_eq!(config.reference_id.as_deref(), Some("l1U9OB_cQJK0G2mjGa12Bg"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_from_toml_str_rejects_garbage() {
        let err = AppConfig::from_toml_str("[hedgedoc\nprogram = 1").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidConfig(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reference]\noutput = \"ref.md\"\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("ref.md"));

        let missing = AppConfig::load_from_file(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PROGRAM, "/opt/hedgedoc"),
            (ENV_STRUCTURE, ""),
            (ENV_REFERENCE_ID, "abc"),
        ]);

        let config =
            AppConfig::new().with_overrides_from(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.program, PathBuf::from("/opt/hedgedoc"));
        assert_eq!(config.structure_path, PathBuf::from("hd.structure.yaml"));
        assert_eq!(config.reference_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_reference_id_resolution() {
        let config = AppConfig {
            reference_id: Some("from-file".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.reference_id_or(None).unwrap(), "from-file");
        assert_eq!(
            config.reference_id_or(Some("flag".to_string())).unwrap(),
            "flag"
        );

        let err = AppConfig::new().reference_id_or(None).unwrap_err();
        assert!(err.to_string().contains("--reference-id"));
    }
}
