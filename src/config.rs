use crate::domain::{CommitScheme, SchemePreset, SINGLE_PROJECT};
use crate::error::{GitMonoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "gitmono.toml";

/// Represents the complete configuration for git-mono.
///
/// Contains the project set, the version prefix, the commit scheme and the dry-run switch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_projects")]
    pub projects: Vec<String>,

    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    #[serde(default)]
    pub commit_scheme: CommitSchemeConfig,

    #[serde(default)]
    pub dry_run: bool,
}

/// Returns the default project set: the whole repository as one project.
fn default_projects() -> Vec<String> {
    vec![SINGLE_PROJECT.to_string()]
}

/// Returns the default version prefix.
fn default_version_prefix() -> String {
    "v".to_string()
}

/// Configuration for commit classification.
///
/// A preset supplies the marker patterns; any list given explicitly replaces
/// the preset's list for that kind of change.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CommitSchemeConfig {
    #[serde(default)]
    pub preset: SchemePreset,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Vec<String>>,
}

impl CommitSchemeConfig {
    /// Marker patterns after applying overrides to the preset
    pub fn resolve(&self) -> CommitScheme {
        let preset = self.preset.markers();
        CommitScheme {
            breaking: self.breaking.clone().unwrap_or(preset.breaking),
            feature: self.feature.clone().unwrap_or(preset.feature),
            fix: self.fix.clone().unwrap_or(preset.fix),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            projects: default_projects(),
            version_prefix: default_version_prefix(),
            commit_scheme: CommitSchemeConfig::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Checks the project set: non-empty, no blank or duplicate identifiers.
    ///
    /// Duplicates are detected case-insensitively, matching how tags are
    /// attributed to projects.
    pub fn validate(&self) -> Result<()> {
        if self.projects.is_empty() {
            return Err(GitMonoError::config("No projects configured"));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.trim().is_empty() {
                return Err(GitMonoError::config("Project identifiers must not be empty"));
            }
            if project.ends_with('/') {
                return Err(GitMonoError::config(format!(
                    "Project '{}' must not end with '/'",
                    project
                )));
            }
            if !seen.insert(project.to_lowercase()) {
                return Err(GitMonoError::config(format!(
                    "Project '{}' is configured more than once",
                    project
                )));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitmono.toml` in current directory
/// 3. `gitmono.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses and validates configuration text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| GitMonoError::config(format!("Invalid configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}
