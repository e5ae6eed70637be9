//! Configuration management for docpages.
//!
//! Parses `docpages.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Build orchestrators can adjust the loaded values via [`ConfigOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.template`
//! - `reference.template`
//! - `i18n.default_locale`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Settings supplied by the build orchestrator that override file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override the project directory templates are resolved against.
    pub project_dir: Option<PathBuf>,
    /// Override the default locale.
    pub default_locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docpages.toml";

const DEFAULT_DOCS_ROOT: &str = "src/docs";
const DEFAULT_DOCS_INDEX_PATH: &str = "/docs/";
const DEFAULT_DOCS_TEMPLATE: &str = "src/templates/Documentation.js";
const DEFAULT_REFERENCE_ROOT: &str = "src/api";
const DEFAULT_REFERENCE_PATH: &str = "docs/api";
const DEFAULT_REFERENCE_TEMPLATE: &str = "src/templates/ApiReference.js";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content discovery configuration.
    pub content: ContentConfig,
    /// Documentation pages configuration (template as a relative string).
    docs: DocsConfigRaw,
    /// API reference configuration (template as a relative string).
    reference: ReferenceConfigRaw,
    /// Locale configuration.
    pub i18n: I18nConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved reference configuration (set after loading).
    #[serde(skip)]
    pub reference_resolved: ReferenceConfig,
    /// Directory templates are resolved against (set after loading).
    #[serde(skip)]
    pub project_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Content discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root prefix stripped from relative paths when building routes.
    pub root: String,
    /// Content source instance name requested from the host.
    pub source_name: String,
    /// File extension of content files, without the leading dot.
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "src".to_owned(),
            source_name: "docs".to_owned(),
            extension: "mdx".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    root: Option<String>,
    index_path: Option<String>,
    template: Option<String>,
}

/// Resolved documentation pages configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory whose documents are served at `index_path`.
    pub root: String,
    /// URL path for documents directly inside `root`.
    pub index_path: String,
    /// Absolute path to the documentation template.
    pub template: PathBuf,
}

/// Raw reference configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ReferenceConfigRaw {
    root: Option<String>,
    path: Option<String>,
    template: Option<String>,
}

/// Resolved API reference configuration.
#[derive(Debug, Default)]
pub struct ReferenceConfig {
    /// Substring identifying reference directories.
    pub root: String,
    /// URL path of the single reference page.
    pub path: String,
    /// Absolute path to the API reference template.
    pub template: PathBuf,
}

impl ReferenceConfig {
    /// Wildcard match path routing every sub-path to the reference page.
    #[must_use]
    pub fn match_path(&self) -> String {
        format!("{}/*", self.path)
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale attached to every generated page.
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
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
        /// Config field path (e.g., "`docs.template`").
        field: String,
        /// Error message (e.g., "${`DOCS_TEMPLATE`} not set").
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
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docpages.toml` in current directory and parents.
    ///
    /// Overrides are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
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

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply orchestrator overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(project_dir) = &overrides.project_dir {
            self.resolve_paths(project_dir);
        }
        if let Some(locale) = &overrides.default_locale {
            self.i18n.default_locale.clone_from(locale);
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
    pub fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            content: ContentConfig::default(),
            docs: DocsConfigRaw::default(),
            reference: ReferenceConfigRaw::default(),
            i18n: I18nConfig::default(),
            docs_resolved: DocsConfig::default(),
            reference_resolved: ReferenceConfig::default(),
            project_dir: PathBuf::new(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
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
        self.validate_content()?;
        self.validate_docs()?;
        self.validate_reference()?;
        require_non_empty(&self.i18n.default_locale, "i18n.default_locale")?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.content.root, "content.root")?;
        require_non_empty(&self.content.source_name, "content.source_name")?;
        require_non_empty(&self.content.extension, "content.extension")?;
        if self.content.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "content.extension must not start with a dot".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.root, "docs.root")?;
        if !docs.index_path.starts_with('/') || !docs.index_path.ends_with('/') {
            return Err(ConfigError::Validation(
                "docs.index_path must start and end with /".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_reference(&self) -> Result<(), ConfigError> {
        let reference = &self.reference_resolved;
        require_non_empty(&reference.root, "reference.root")?;
        require_non_empty(&reference.path, "reference.path")?;
        // The wildcard suffix is appended when building the match path
        if reference.path.contains('*') {
            return Err(ConfigError::Validation(
                "reference.path cannot contain *".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref template) = self.docs.template {
            self.docs.template = Some(expand::expand_env(template, "docs.template")?);
        }
        if let Some(ref template) = self.reference.template {
            self.reference.template = Some(expand::expand_env(template, "reference.template")?);
        }
        self.i18n.default_locale =
            expand::expand_env(&self.i18n.default_locale, "i18n.default_locale")?;
        Ok(())
    }

    /// Resolve template paths against `base` and fill in section defaults.
    fn resolve_paths(&mut self, base: &Path) {
        let base = absolute_base(base);
        let resolve = |path: Option<&str>, default: &str| base.join(path.unwrap_or(default));
        let or_default = |value: Option<&String>, default: &str| {
            value.map_or_else(|| default.to_owned(), Clone::clone)
        };

        self.docs_resolved = DocsConfig {
            root: or_default(self.docs.root.as_ref(), DEFAULT_DOCS_ROOT),
            index_path: or_default(self.docs.index_path.as_ref(), DEFAULT_DOCS_INDEX_PATH),
            template: resolve(self.docs.template.as_deref(), DEFAULT_DOCS_TEMPLATE),
        };

        self.reference_resolved = ReferenceConfig {
            root: or_default(self.reference.root.as_ref(), DEFAULT_REFERENCE_ROOT),
            path: or_default(self.reference.path.as_ref(), DEFAULT_REFERENCE_PATH),
            template: resolve(
                self.reference.template.as_deref(),
                DEFAULT_REFERENCE_TEMPLATE,
            ),
        };

        self.project_dir = base;
    }
}

/// Anchor a relative base directory at the current working directory.
///
/// Templates handed to the host must be absolute, so `"."` and bare relative
/// config locations resolve against the process's working directory.
fn absolute_base(base: &Path) -> PathBuf {
    if base.is_absolute() {
        return base.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_default();
    base.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .fold(cwd, |acc, c| acc.join(c))
}
