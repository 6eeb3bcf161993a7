//! Configuration module for the API reference tool.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `APIREF_` and use double
//! underscores to separate nested levels:
//! - `APIREF_CORPUS__DATA_DIR=/srv/apiref` sets `corpus.data_dir`
//! - `APIREF_CORPUS__SAPUI5_VERSION=1.120.30` sets `corpus.sapui5_version`
//! - `APIREF_OUTPUT__SUMMARIZE=true` sets `output.summarize`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ApiRefError, ApiRefResult};
use crate::types::Framework;

const CONFIG_DIR_NAME: &str = ".apiref";
const CONFIG_FILE_NAME: &str = "settings.toml";
const ENV_PREFIX: &str = "APIREF_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Where documentation corpora are found
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Shape of lookup results
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorpusConfig {
    /// Directory holding `api_json_files/<framework>-<version>` corpora
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Framework used when none is given on the command line
    #[serde(default = "default_framework")]
    pub default_framework: Framework,

    /// Version used for OpenUI5 lookups when none is given
    #[serde(default = "default_openui5_version")]
    pub openui5_version: String,

    /// Version used for SAPUI5 lookups when none is given
    #[serde(default = "default_sapui5_version")]
    pub sapui5_version: String,

    /// Index a corpus on first use if it has no `index.json`
    #[serde(default = "default_true")]
    pub build_missing_index: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Shorten top-level symbols to their summary
    #[serde(default = "default_false")]
    pub summarize: bool,

    /// Attach documentation links to results
    #[serde(default = "default_true")]
    pub include_uri: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
}
fn default_framework() -> Framework {
    Framework::OpenUI5
}
fn default_openui5_version() -> String {
    "1.136.5".to_string()
}
fn default_sapui5_version() -> String {
    "1.136.7".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            corpus: CorpusConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_framework: default_framework(),
            openui5_version: default_openui5_version(),
            sapui5_version: default_sapui5_version(),
            build_missing_index: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summarize: false,
            include_uri: true,
        }
    }
}

impl CorpusConfig {
    /// Configured default version of a framework
    pub fn version_for(&self, framework: Framework) -> &str {
        match framework {
            Framework::OpenUI5 => &self.openui5_version,
            Framework::SAPUI5 => &self.sapui5_version,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels,
            // single underscore (_) remains as is within field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the workspace config by looking for .apiref directory
    /// Searches from current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR_NAME);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE_NAME));
            }
        }

        None
    }

    /// Path of the settings file that [`Settings::load`] reads
    pub fn config_path() -> PathBuf {
        Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> ApiRefResult<PathBuf> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Err(ApiRefError::Config {
                reason: "No configuration file found".to_string(),
            });
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ApiRefError::Config {
            reason: format!("Cannot read configuration file: {e}"),
        })?;
        toml::from_str::<Settings>(&content).map_err(|e| ApiRefError::Config {
            reason: format!("Configuration file is corrupted: {e}"),
        })?;
        Ok(config_path)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> ApiRefResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiRefError::Config {
                reason: format!("Cannot create {}: {e}", parent.display()),
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| ApiRefError::Config {
            reason: e.to_string(),
        })?;
        std::fs::write(path, toml_string).map_err(|e| ApiRefError::Config {
            reason: format!("Cannot write {}: {e}", path.display()),
        })
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> ApiRefResult<PathBuf> {
        let config_path = PathBuf::from(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        Self::write_template(&config_path, force)?;
        Ok(config_path)
    }

    fn write_template(config_path: &Path, force: bool) -> ApiRefResult<()> {
        if !force && config_path.exists() {
            return Err(ApiRefError::Config {
                reason: "Configuration file already exists. Use --force to overwrite".to_string(),
            });
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiRefError::Config {
                reason: format!("Cannot create {}: {e}", parent.display()),
            })?;
        }

        let defaults = CorpusConfig::default();
        let template = format!(
            r#"# API reference lookup configuration

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

[corpus]
# Directory holding the documentation corpora, laid out as
# <data_dir>/api_json_files/<framework>-<version>/*.api.json
data_dir = '{}'

# Framework used when --framework is not given: "OpenUI5" or "SAPUI5"
default_framework = "{}"

# Versions used when --version is not given
openui5_version = "{}"
sapui5_version = "{}"

# Build index.json on first use when a corpus has none
build_missing_index = true

[output]
# Shorten classes, namespaces etc. to a summary
summarize = false

# Attach a link to the public API documentation to every result
include_uri = true
"#,
            defaults.data_dir.display(),
            defaults.default_framework,
            defaults.openui5_version,
            defaults.sapui5_version,
        );

        std::fs::write(config_path, template).map_err(|e| ApiRefError::Config {
            reason: format!("Cannot write {}: {e}", config_path.display()),
        })
    }
}
