//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.postjoin.toml` files.

use crate::avatar::AvatarConfig;
use crate::cli::OutputFormat;
use crate::source::SourceConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".postjoin.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings.
    #[serde(default)]
    pub source: SourceSection,

    /// Avatar URL settings.
    #[serde(default)]
    pub avatar: AvatarSection,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSection,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Base URL of the posts API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    SourceConfig::default().base_url
}

fn default_timeout() -> u64 {
    30
}

/// Avatar URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarSection {
    /// Avatar service endpoint.
    #[serde(default = "default_avatar_url")]
    pub base_url: String,

    /// Requested image size in pixels.
    #[serde(default = "default_avatar_size")]
    pub size: u32,

    /// Fallback image style.
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for AvatarSection {
    fn default() -> Self {
        Self {
            base_url: default_avatar_url(),
            size: default_avatar_size(),
            default_image: default_image(),
        }
    }
}

fn default_avatar_url() -> String {
    "https://www.gravatar.com/avatar".to_string()
}

fn default_avatar_size() -> u32 {
    200
}

fn default_image() -> String {
    "identicon".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl From<&SourceSection> for SourceConfig {
    fn from(section: &SourceSection) -> Self {
        Self {
            base_url: section.base_url.clone(),
            timeout_seconds: section.timeout_seconds,
        }
    }
}

impl From<&AvatarSection> for AvatarConfig {
    fn from(section: &AvatarSection) -> Self {
        Self {
            base_url: section.base_url.clone(),
            size: section.size,
            default_image: section.default_image.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.postjoin.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref base_url) = args.base_url {
            self.source.base_url = base_url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(format) = args.format {
            self.output.format = format;
        }
    }

    /// Check values that may come from the file rather than the CLI.
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.source.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!(
                "source.base_url must start with 'http://' or 'https://': {}",
                base_url
            );
        }

        if self.source.timeout_seconds == 0 {
            bail!("source.timeout_seconds must be at least 1");
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
