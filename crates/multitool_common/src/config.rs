//! Launcher configuration
//!
//! Config file: `--config`, `$MULTITOOL_CONFIG`, `./config.toml`, or
//! `~/.config/multitool/config.toml`, first match wins.

use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Environment override for the config file location
pub const CONFIG_ENV: &str = "MULTITOOL_CONFIG";

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_MODULES_DIR: &str = "modules";

const DEFAULT_ART: [&str; 6] = [
    "███╗   ███╗████████╗",
    "████╗ ████║╚══██╔══╝",
    "██╔████╔██║   ██║   ",
    "██║╚██╔╝██║   ██║   ",
    "██║ ╚═╝ ██║   ██║   ",
    "╚═╝     ╚═╝   ╚═╝   ",
];

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file found (looked for {0})")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A named column of the menu, backed by one folder of manifests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Label shown at the top of the column
    #[serde(rename = "name")]
    pub display_name: String,

    /// Folder under the modules directory holding this category's tools
    #[serde(rename = "folder")]
    pub storage_key: String,
}

impl Category {
    pub fn new(display_name: impl Into<String>, storage_key: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            storage_key: storage_key.into(),
        }
    }
}

/// Banner and info lines drawn above the description block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_art")]
    pub art: Vec<String>,

    #[serde(default = "default_info")]
    pub info: Vec<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            art: default_art(),
            info: default_info(),
        }
    }
}

fn default_art() -> Vec<String> {
    DEFAULT_ART.iter().map(|line| line.to_string()).collect()
}

fn default_info() -> Vec<String> {
    vec![
        "multitool".to_string(),
        "pick a tool, press enter, come back when it is done".to_string(),
    ]
}

/// On-disk shape of the config file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    modules_dir: Option<PathBuf>,

    #[serde(default)]
    banner: BannerConfig,

    #[serde(default, rename = "category")]
    categories: Vec<Category>,
}

/// Validated launcher configuration
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Root holding one folder per category
    pub modules_dir: PathBuf,
    pub banner: BannerConfig,
    /// Display order is significant
    pub categories: Vec<Category>,
}

impl LauncherConfig {
    /// Find the config file to use
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("multitool").join(CONFIG_FILE_NAME));
        }

        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            return Ok(found.clone());
        }

        let looked = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConfigError::NotFound(looked))
    }

    /// Read, parse and validate a config file.
    ///
    /// A relative `modules_dir` is resolved against the directory holding the
    /// config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&contents, base_dir).map_err(|err| match err {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })
    }

    /// Parse config text; `base_dir` anchors a relative modules directory
    pub fn from_toml_str(contents: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        Self::parse(contents, base_dir).map_err(|err| match err {
            ParseFailure::Toml(source) => ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            },
            ParseFailure::Invalid(err) => err,
        })
    }

    fn parse(contents: &str, base_dir: &Path) -> Result<Self, ParseFailure> {
        let file: ConfigFile = toml::from_str(contents).map_err(ParseFailure::Toml)?;

        let modules_dir = file
            .modules_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULES_DIR));
        let modules_dir = if modules_dir.is_absolute() {
            modules_dir
        } else {
            base_dir.join(modules_dir)
        };

        let config = Self {
            modules_dir,
            banner: file.banner,
            categories: file.categories,
        };
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    /// Check the invariants the menu relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[category]] is required".to_string(),
            ));
        }

        for category in &self.categories {
            if category.display_name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category with folder '{}' has an empty name",
                    category.storage_key
                )));
            }
            if !is_plain_relative(&category.storage_key) {
                return Err(ConfigError::Invalid(format!(
                    "category '{}' has folder '{}'; folders must be relative and stay inside the modules directory",
                    category.display_name, category.storage_key
                )));
            }
        }

        Ok(())
    }
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn is_plain_relative(folder: &str) -> bool {
    let path = Path::new(folder);
    !folder.trim().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
