//! Configuration management for the OneStep docs site.
//!
//! Parses `osd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The `[sidebar]` table declares the site navigation. Keys keep their
//! declaration order:
//!
//! ```toml
//! [[sidebar."/"]]
//! text = "指南"
//! items = [{ text = "快速开始", link = "/guide/" }]
//!
//! [sidebar."/broker/"]
//! text = "Broker"
//! items = [{ text = "Redis", link = "/broker/redis", tags = ["redis"] }]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `edit_link.pattern`

mod expand;

use std::path::{Path, PathBuf};

use osd_site::{Navigation, Sidebar};
use serde::{Deserialize, Serialize};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
    /// Override public site URL.
    pub url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "osd.toml";

/// Placeholder replaced by the page path in edit links.
const PATH_PLACEHOLDER: &str = ":path";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// "Edit this page" link (optional section).
    pub edit_link: Option<EditLink>,
    /// Top navigation bar links.
    pub nav: Vec<NavLink>,
    /// Sidebar declaration.
    pub sidebar: Sidebar,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site metadata.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Content language.
    pub lang: String,
    /// Public site URL.
    pub url: Option<String>,
    /// Logo path.
    pub logo: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "OneStep".to_owned(),
            description: String::new(),
            lang: "zh-CN".to_owned(),
            url: None,
            logo: None,
        }
    }
}

/// "Edit this page" link configuration.
#[derive(Debug, Deserialize)]
pub struct EditLink {
    /// URL pattern containing `:path`.
    pub pattern: String,
    /// Link text.
    #[serde(default = "default_edit_link_text")]
    pub text: String,
}

impl EditLink {
    /// Edit URL for a page source path such as `broker/cron.md`.
    #[must_use]
    pub fn url_for(&self, page_path: &str) -> String {
        self.pattern
            .replace(PATH_PLACEHOLDER, page_path.trim_start_matches('/'))
    }

    /// Edit URL for a site route such as `/broker/cron` or `/guide/`.
    ///
    /// Routes map to their markdown source: `/a/` to `a/index.md`, `/a` and
    /// `/a.html` to `a.md`. Returns `None` for external links.
    #[must_use]
    pub fn url_for_route(&self, route: &str) -> Option<String> {
        if route.contains("://") {
            return None;
        }
        let route = route.split(['#', '?']).next().unwrap_or_default();
        let route = route.trim_start_matches('/');
        let source = if route.is_empty() || route.ends_with('/') {
            format!("{route}index.md")
        } else if route.ends_with(".md") {
            route.to_owned()
        } else {
            format!("{}.md", route.strip_suffix(".html").unwrap_or(route))
        };
        Some(self.url_for(&source))
    }
}

fn default_edit_link_text() -> String {
    "Edit this page".to_owned()
}

/// Top navigation bar link.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Link target.
    pub link: String,
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
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
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

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `osd.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings take precedence over file values and are validated
    /// together with them.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Navigation declared by the sidebar, in declaration order.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        self.sidebar.to_navigation()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(url) = &settings.url {
            self.site.url = Some(url.clone());
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            sidebar_keys = config.sidebar.keys().count(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_edit_link()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if let Some(url) = &self.site.url {
            require_http_url(url, "site.url")?;
        }
        Ok(())
    }

    fn validate_edit_link(&self) -> Result<(), ConfigError> {
        let Some(edit_link) = &self.edit_link else {
            return Ok(());
        };
        require_non_empty(&edit_link.pattern, "edit_link.pattern")?;
        require_http_url(&edit_link.pattern, "edit_link.pattern")?;
        if !edit_link.pattern.contains(PATH_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "edit_link.pattern must contain {PATH_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        if let Some(ref mut edit_link) = self.edit_link {
            edit_link.pattern = expand::expand_env(&edit_link.pattern, "edit_link.pattern")?;
        }
        Ok(())
    }
}
