//! Resolution of a bound shell string into a spawnable command line

use thiserror::Error;

use crate::config_file::ContainerTarget;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Container mode requested but no devcontainer is configured")]
    MissingContainerTarget,
}

/// A fully resolved command line, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Program followed by its arguments.
    pub command_line: Vec<String>,
    pub run_in_container: bool,
}

/// Build the command line for a bound shell string.
///
/// Host commands run through `sh -c`. Container commands are wrapped in
/// `docker exec` against the configured target, with the working-directory
/// flag only present when the config declares one. Container configuration
/// is never consulted unless `wants_container` is set.
///
/// # Errors
///
/// Returns `ResolveError::MissingContainerTarget` if container mode is
/// requested without a usable container name.
pub fn resolve(
    bound_shell: &str,
    container: Option<&ContainerTarget>,
    wants_container: bool,
) -> Result<ExecutionRequest, ResolveError> {
    if !wants_container {
        return Ok(ExecutionRequest {
            command_line: vec!["sh".into(), "-c".into(), bound_shell.into()],
            run_in_container: false,
        });
    }

    let target = container
        .filter(|c| !c.name.is_empty())
        .ok_or(ResolveError::MissingContainerTarget)?;

    let mut command_line: Vec<String> = vec!["docker".into(), "exec".into(), "-it".into()];
    if let Some(dir) = &target.work_dir {
        command_line.push("-w".into());
        command_line.push(dir.clone());
    }
    command_line.push(target.name.clone());
    command_line.extend(["sh".into(), "-c".into(), bound_shell.into()]);

    Ok(ExecutionRequest {
        command_line,
        run_in_container: true,
    })
}
