//! Configuration file handling for devcmd

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or querying configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found in current directory or its parents: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to read config file {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Invalid config: {0}")]
    Validation(String),
    #[error("Unknown command: {0}")]
    CommandNotFound(String),
}

/// Container section of the config file
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConfigDevcontainer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dir: String,
}

/// A single command entry: either a bare shell template, or a mapping with a
/// separate display name
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum ConfigCommand {
    Shell(String),
    Detailed {
        shell: String,
        #[serde(default)]
        name: String,
    },
}

/// Root configuration structure for devcmd
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    pub devcontainer: Option<ConfigDevcontainer>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub commands: BTreeMap<String, ConfigCommand>,
}

/// A named shell template, ready for argument binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub shell: String,
}

/// The development container commands may be dispatched into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTarget {
    pub name: String,
    pub work_dir: Option<String>,
}

/// Loaded configuration, read-only after conversion
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub commands: BTreeMap<String, CommandSpec>,
    pub container: Option<ContainerTarget>,
    pub env: HashMap<String, String>,
}

impl From<ConfigFile> for Config {
    fn from(config: ConfigFile) -> Self {
        let commands = config
            .commands
            .into_iter()
            .map(|(key, command)| {
                let (shell, name) = match command {
                    ConfigCommand::Shell(shell) => (shell, String::new()),
                    ConfigCommand::Detailed { shell, name } => (shell, name),
                };
                // Commands without a usable display name fall back to their key
                let name = if name.trim().is_empty() {
                    key.clone()
                } else {
                    name
                };
                (key, CommandSpec { name, shell })
            })
            .collect();
        let container = config.devcontainer.map(|dev| ContainerTarget {
            work_dir: (!dev.dir.is_empty()).then_some(dev.dir),
            name: dev.name,
        });
        Config {
            commands,
            container,
            env: config.env,
        }
    }
}

/// Directory the config file lives in, relative to the project root
pub const CONFIG_DIR: &str = ".devcontainer";

/// List of supported configuration file names
const FILENAMES: [&str; 2] = ["cmd.yaml", "cmd.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::Io` if it cannot be read, or `ConfigError::Yaml` if
    /// parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|e| {
            if file.exists() {
                ConfigError::Io {
                    source: e,
                    path: file.to_path_buf(),
                }
            } else {
                ConfigError::ConfigNotFound(file.to_path_buf())
            }
        })?;
        let config: ConfigFile =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?;
        Ok(config.into())
    }

    /// Searches for a configuration file in the `.devcontainer` directory of
    /// the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        Self::find_config_from(&cwd)
    }

    /// Searches for a configuration file upward from `start`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if no config file is found in
    /// `start` or any of its parents.
    pub fn find_config_from(start: &Path) -> Result<PathBuf, ConfigError> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(CONFIG_DIR).join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(start.to_path_buf()));
            }
        }
    }

    /// Looks up a configured command by its mapping key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CommandNotFound` if no command uses the key.
    pub fn lookup(&self, name: &str) -> Result<&CommandSpec, ConfigError> {
        self.commands
            .get(name)
            .ok_or_else(|| ConfigError::CommandNotFound(name.to_string()))
    }
}
