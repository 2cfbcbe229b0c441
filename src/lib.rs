//! Core implementation of the devcmd command dispatcher
//!
//! devcmd reads a YAML description of project commands from a
//! `.devcontainer` directory and runs the chosen command either on the host
//! shell or inside the project's development container. The pipeline is:
//! bind trailing CLI arguments into the command's shell template, resolve
//! the template into a concrete command line (host `sh -c` or a
//! `docker exec` wrapper), then spawn it with inherited standard streams
//! while relaying interrupt signals and reporting timing.

use std::path::PathBuf;

use log::debug;

use crate::config_file::{Config, ConfigError};

pub mod config_file;
pub mod relay;
pub mod runner;
pub mod scaffold;
pub mod style;
pub mod target;
pub mod template;

/// Load configuration from a file (or auto-detect), returning the validated `Config`.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found, cannot be parsed,
/// or contains unusable values.
pub fn load_config(config_file: Option<&str>) -> Result<Config, ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    debug!("Loading config file: {}", config_path.display());
    let config = Config::from_file(&config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Validate the loaded config for values the dispatcher cannot work with
fn validate(config: &Config) -> Result<(), ConfigError> {
    for (key, spec) in &config.commands {
        if key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Commands mapping contains an empty command name".to_string(),
            ));
        }
        if spec.shell.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Command '{key}' has an empty shell template"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::CommandSpec;

    fn config_with(key: &str, shell: &str) -> Config {
        let mut config = Config::default();
        config.commands.insert(
            key.to_string(),
            CommandSpec {
                name: key.to_string(),
                shell: shell.to_string(),
            },
        );
        config
    }

    #[test]
    fn test_empty_shell_template_rejected() {
        let result = validate(&config_with("build", "   "));
        assert!(result.is_err());
        match result.unwrap_err() {
            ConfigError::Validation(msg) => assert!(msg.contains("empty shell"), "got: {msg}"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_empty_command_name_rejected() {
        let result = validate(&config_with("", "echo hi"));
        assert!(result.is_err());
        match result.unwrap_err() {
            ConfigError::Validation(msg) => assert!(msg.contains("empty command"), "got: {msg}"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&config_with("build", "make")).is_ok());
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let result = load_config(Some("/definitely/not/here/cmd.yaml"));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd.yaml");
        std::fs::write(&path, "commands:\n  hello: echo hi\n").unwrap();
        let config = load_config(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(config.commands["hello"].shell, "echo hi");
    }
}
