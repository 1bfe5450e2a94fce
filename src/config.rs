use crate::error::{ConventionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-convention.
///
/// Covers version-tag naming and history-check behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

/// Returns the default tag prefix for version tags.
fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Configuration for version tag naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            tag_prefix: default_tag_prefix(),
        }
    }
}

fn default_fail_fast() -> bool {
    true
}

/// Configuration for history checking behavior.
///
/// With `fail_fast` disabled, `check` collects every failure and reports
/// statistics instead of stopping at the first offending commit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CheckConfig {
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            fail_fast: default_fail_fast(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `convention.toml` in current directory
/// 3. `.convention.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./convention.toml").exists() {
        fs::read_to_string("./convention.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".convention.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ConventionError::config(e.to_string()))?;
    Ok(config)
}
