//! Configuration management for texdoc.
//!
//! Parses `texdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! The `output` value supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output file.
    pub output: Option<PathBuf>,
    /// Override inline reference connector.
    pub see_inline: Option<String>,
    /// Override see-also heading.
    pub see_block: Option<String>,
    /// Override quiet flag.
    pub quiet: Option<bool>,
    /// Override exclusion tag.
    pub exclude_tag: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "texdoc.toml";

const DEFAULT_OUTPUT: &str = "docs.tex";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output file as written in TOML, relative to the config file.
    output: Option<String>,
    /// Connector placed before inline cross-references.
    pub see_inline: String,
    /// Heading of see-also blocks.
    pub see_block: String,
    /// Suppress informational console output.
    pub quiet: bool,
    /// Block tag that excludes a type from the output.
    pub exclude_tag: String,

    /// Resolved output path (set after loading).
    #[serde(skip)]
    pub output_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error, including unrecognized keys.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g., "output").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `texdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.output_path.clone_from(output);
        }
        if let Some(see_inline) = &settings.see_inline {
            self.see_inline.clone_from(see_inline);
        }
        if let Some(see_block) = &settings.see_block {
            self.see_block.clone_from(see_block);
        }
        if let Some(quiet) = settings.quiet {
            self.quiet = quiet;
        }
        if let Some(exclude_tag) = &settings.exclude_tag {
            self.exclude_tag.clone_from(exclude_tag);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            output: None,
            see_inline: "see ".to_owned(),
            see_block: "See also".to_owned(),
            quiet: false,
            exclude_tag: "@texignore".to_owned(),
            output_path: base.join(DEFAULT_OUTPUT),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        if let Some(output) = &config.output {
            config.output = Some(expand::expand_env(output, "output")?);
        }

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve the output path relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_path = config_dir.join(self.output.as_deref().unwrap_or(DEFAULT_OUTPUT));
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output cannot be empty".to_owned()));
        }
        require_non_empty(&self.see_inline, "see_inline")?;
        require_non_empty(&self.see_block, "see_block")?;
        require_non_empty(&self.exclude_tag, "exclude_tag")?;
        if !self.exclude_tag.starts_with('@') {
            return Err(ConfigError::Validation(format!(
                "exclude_tag must start with '@', got '{}'",
                self.exclude_tag
            )));
        }
        Ok(())
    }
}
