//! Configuration for the remote wiki connection and conversion behavior.
//!
//! Follows a builder pattern with validation; persisted as YAML.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted when no token is set in the file.
pub const TOKEN_ENV: &str = "WIKIBRIDGE_TOKEN";

fn default_locale() -> String {
    "en".to_string()
}

fn default_editor() -> String {
    "markdown".to_string()
}

fn default_attachment_dirs() -> Vec<String> {
    ["attachments", "assets", "images", "files", "media"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

/// Connection and conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Base URL of the wiki, e.g. `https://wiki.example.com`
    pub base_url: String,
    /// API token; usually left unset in the file and taken from the
    /// `WIKIBRIDGE_TOKEN` environment variable instead
    #[serde(default)]
    pub api_token: Option<String>,
    /// Page locale used in queries and mutations
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Editor identifier recorded on created pages
    #[serde(default = "default_editor")]
    pub editor: String,
    /// Folder prefix applied when the caller gives none
    #[serde(default)]
    pub default_folder: Option<String>,
    /// Leave wiki-style syntax untouched instead of converting it
    #[serde(default)]
    pub preserve_wiki_syntax: bool,
    /// Rewrite relative markdown link targets to root-relative
    #[serde(default = "default_true")]
    pub auto_convert_links: bool,
    /// Conventional attachment folder names probed by the image resolver
    #[serde(default = "default_attachment_dirs")]
    pub attachment_dirs: Vec<String>,
}

impl WikiConfig {
    /// Create a new config with builder
    pub fn builder(base_url: impl Into<String>) -> WikiConfigBuilder {
        WikiConfigBuilder::new(base_url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config_error("Wiki base URL cannot be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::config_error(format!(
                "Wiki base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.locale.is_empty() {
            return Err(Error::config_error("Locale cannot be empty"));
        }
        Ok(())
    }

    /// Resolve the API token: explicit config value first, then the
    /// environment.
    pub fn resolve_token(&self) -> Result<String> {
        if let Some(token) = &self.api_token {
            if !token.is_empty() {
                return Ok(token.clone());
            }
        }
        std::env::var(TOKEN_ENV).map_err(|_| {
            Error::config_error(format!(
                "No API token configured and {TOKEN_ENV} is not set"
            ))
        })
    }

    /// Load configuration from a YAML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: WikiConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {e}")))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!("Failed to save config {}: {}", path.display(), e))
        })
    }
}

/// Builder for WikiConfig
pub struct WikiConfigBuilder {
    base_url: String,
    api_token: Option<String>,
    locale: String,
    editor: String,
    default_folder: Option<String>,
    preserve_wiki_syntax: bool,
    auto_convert_links: bool,
    attachment_dirs: Vec<String>,
}

impl WikiConfigBuilder {
    /// Create a new builder
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            locale: default_locale(),
            editor: default_editor(),
            default_folder: None,
            preserve_wiki_syntax: false,
            auto_convert_links: true,
            attachment_dirs: default_attachment_dirs(),
        }
    }

    /// Set an explicit API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the page locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the default folder prefix
    pub fn default_folder(mut self, folder: impl Into<String>) -> Self {
        self.default_folder = Some(folder.into());
        self
    }

    /// Keep wiki-style syntax as-is
    pub fn preserve_wiki_syntax(mut self, preserve: bool) -> Self {
        self.preserve_wiki_syntax = preserve;
        self
    }

    /// Toggle relative-link rewriting
    pub fn auto_convert_links(mut self, auto: bool) -> Self {
        self.auto_convert_links = auto;
        self
    }

    /// Override the attachment folder name list
    pub fn attachment_dirs(mut self, dirs: Vec<String>) -> Self {
        self.attachment_dirs = dirs;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<WikiConfig> {
        let config = WikiConfig {
            base_url: self.base_url,
            api_token: self.api_token,
            locale: self.locale,
            editor: self.editor,
            default_folder: self.default_folder,
            preserve_wiki_syntax: self.preserve_wiki_syntax,
            auto_convert_links: self.auto_convert_links,
            attachment_dirs: self.attachment_dirs,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let config = WikiConfig::builder("https://wiki.example.com")
            .api_token("secret")
            .locale("de")
            .default_folder("notes")
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://wiki.example.com");
        assert_eq!(config.locale, "de");
        assert!(config.auto_convert_links);
        assert_eq!(config.resolve_token().unwrap(), "secret");
    }

    #[test]
    fn test_config_validation_rejects_bad_url() {
        assert!(WikiConfig::builder("").build().is_err());
        assert!(WikiConfig::builder("ftp://wiki").build().is_err());
    }

    #[tokio::test]
    async fn test_config_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wikibridge.yml");

        let config = WikiConfig::builder("https://wiki.example.com")
            .preserve_wiki_syntax(true)
            .build()
            .unwrap();
        config.save(&path).await.unwrap();

        let loaded = WikiConfig::load(&path).await.unwrap();
        assert_eq!(loaded.base_url, config.base_url);
        assert!(loaded.preserve_wiki_syntax);
        assert_eq!(loaded.attachment_dirs, config.attachment_dirs);
    }
}
