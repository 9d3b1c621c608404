//! Configuration management infrastructure.
//!
//! This module provides configuration file support, allowing users to save
//! and load converter preferences such as the flag merge policy and the
//! default output format.

use crate::infra::error::{TemplateError, TemplateResult};
use crate::services::merger::FlagMergePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted in the configuration file and by `config set`
pub const CONFIG_KEYS: &[&str] = &["flag_merge", "output_format", "verbose"];

/// Application configuration with all converter preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfiguration {
    /// How CA flags combine across merged segments
    pub flag_merge: FlagMergePolicy,

    /// Default output format for rendered templates
    pub output_format: OutputFormat,

    /// Whether to show verbose output
    pub verbose: bool,
}

impl ConverterConfiguration {
    /// Set one preference from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> TemplateResult<()> {
        match key {
            "flag_merge" => {
                self.flag_merge = value.parse().map_err(TemplateError::ConfigurationError)?;
            }
            "output_format" => {
                self.output_format = value.parse().map_err(TemplateError::ConfigurationError)?;
            }
            "verbose" => {
                self.verbose = value.parse().map_err(|_| {
                    TemplateError::ConfigurationError(format!(
                        "verbose expects true or false, got '{value}'"
                    ))
                })?;
            }
            _ => {
                return Err(TemplateError::ConfigurationError(format!(
                    "Unknown configuration key '{key}' (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Output format for rendered templates and resolved specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> TemplateResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> TemplateResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("yaml-x509").join("config.toml"))
        } else {
            // Fallback to current directory
            Ok(PathBuf::from("yaml-x509-config.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> TemplateResult<ConverterConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = ConverterConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> TemplateResult<ConverterConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            TemplateError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        ExportFormat::Toml.parse(&content).map_err(|e| {
            TemplateError::ConfigurationError(format!(
                "Invalid config file {}: {e}",
                self.config_path.display()
            ))
        })
    }

    /// Save configuration to file
    pub fn save(&self, config: &ConverterConfiguration) -> TemplateResult<()> {
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    TemplateError::ConfigurationError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = ExportFormat::Toml.render(config)?;

        fs::write(&self.config_path, content).map_err(|e| {
            TemplateError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        log::info!("Configuration saved successfully");
        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> TemplateResult<()> {
        let mut config = self.load_or_create_default()?;
        config.set(key, value)?;
        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Export configuration as a portable format
    pub fn export_config(&self, format: ExportFormat) -> TemplateResult<String> {
        format.render(&self.load_or_create_default()?)
    }

    /// Import configuration from a string
    pub fn import_config(&self, content: &str, format: ExportFormat) -> TemplateResult<()> {
        let config = format.parse(content)?;
        self.save(&config)
    }
}

/// Configuration export/import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Json,
    Yaml,
}

impl ExportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Toml => "TOML",
            ExportFormat::Json => "JSON",
            ExportFormat::Yaml => "YAML",
        }
    }

    /// Parse a configuration, rejecting keys the converter does not know
    pub fn parse(self, content: &str) -> TemplateResult<ConverterConfiguration> {
        let parsed = match self {
            ExportFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ExportFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ExportFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| {
            TemplateError::ConfigurationError(format!("{} config rejected: {e}", self.as_str()))
        })
    }

    pub fn render(self, config: &ConverterConfiguration) -> TemplateResult<String> {
        let rendered = match self {
            ExportFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            ExportFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
            ExportFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        };
        rendered.map_err(|e| {
            TemplateError::ConfigurationError(format!("{} export failed: {e}", self.as_str()))
        })
    }
}
