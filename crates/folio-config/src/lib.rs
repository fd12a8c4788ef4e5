//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [content]
//! dir = "content"
//! extension = "mdx"
//!
//! [i18n]
//! locales = ["en", "lo"]
//! default_locale = "en"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and `content.dir` support `${VAR}` (error if unset) and
//! `${VAR:-default}`.

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Default content directory, relative to the config file.
const DEFAULT_CONTENT_DIR: &str = "content";

/// Default chapter file extension.
const DEFAULT_EXTENSION: &str = "mdx";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Locale configuration.
    pub i18n: I18nConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
}

/// Resolved content configuration with an absolute directory.
#[derive(Debug)]
pub struct ContentConfig {
    /// Root directory holding one subdirectory per locale.
    pub dir: PathBuf,
    /// Chapter file extension without the leading dot.
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Known locales; their chapters make up the global slug set.
    pub locales: Vec<String>,
    /// Locale used when a request names none.
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_owned(), "lo".to_owned()],
            default_locale: "en".to_owned(),
        }
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
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.dir`").
        field: String,
        /// Error message (e.g., "${`BOOK_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a value usable as a single directory or file name component.
fn require_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.starts_with('.') || value.contains(['/', '\\', '\0']) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain name, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
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

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.dir.clone_from(content_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            i18n: I18nConfig::default(),
            content_resolved: ContentConfig {
                dir: base.join(DEFAULT_CONTENT_DIR),
                extension: DEFAULT_EXTENSION.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_content()?;
        self.validate_i18n()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        require_name(&self.content_resolved.extension, "content.extension")
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        let i18n = &self.i18n;
        if i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must list at least one locale".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for locale in &i18n.locales {
            require_name(locale, "i18n.locales")?;
            if !seen.insert(locale.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales contains {locale:?} twice"
                )));
            }
        }

        require_name(&i18n.default_locale, "i18n.default_locale")?;
        if !seen.contains(i18n.default_locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale {:?} is not listed in i18n.locales",
                i18n.default_locale
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref dir) = self.content.dir {
            self.content.dir = Some(expand::expand_env(dir, "content.dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let dir = self.content.dir.as_deref().unwrap_or(DEFAULT_CONTENT_DIR);
        let extension = self.content.extension.as_deref().unwrap_or(DEFAULT_EXTENSION);

        self.content_resolved = ContentConfig {
            dir: config_dir.join(dir),
            extension: extension.trim_start_matches('.').to_owned(),
        };
    }
}
