mod cli;

use std::process::ExitCode;

use log::debug;
use thiserror::Error;

use devcmd::config_file::{Config, ConfigError};
use devcmd::runner::{self, RunError};
use devcmd::scaffold::{self, ScaffoldError, ScaffoldKind};
use devcmd::target::{self, ResolveError};
use devcmd::template::{self, BindMode};

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
    #[error("no command name provided")]
    NoCommandName,
}

impl CliError {
    /// Reported aborts exit 1; the dispatcher's own failures exit 2.
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(ConfigError::CommandNotFound(_))
            | CliError::Resolve(ResolveError::MissingContainerTarget)
            | CliError::NoCommandName => 1,
            _ => 2,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let config = match devcmd::load_config(None) {
        Ok(config) => config,
        Err(ConfigError::ConfigNotFound(path)) => {
            debug!(
                "No config file found under {}: continuing with an empty command set",
                path.display()
            );
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    let matches = cli::build(&config).get_matches();
    match matches.subcommand() {
        Some(("init", sub)) => {
            let kind = match sub.subcommand() {
                Some(("go", _)) => ScaffoldKind::Go,
                _ => ScaffoldKind::Base,
            };
            let cwd = std::env::current_dir().map_err(ScaffoldError::from)?;
            scaffold::run(kind, &cwd)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("dev", sub)) => match sub.subcommand() {
            Some((name, cmd_matches)) => dispatch(&config, name, cmd_matches, true),
            None => Err(CliError::NoCommandName),
        },
        Some((name, cmd_matches)) => dispatch(&config, name, cmd_matches, false),
        None => Ok(ExitCode::SUCCESS),
    }
}

/// Run one configured command: bind the trailing arguments, resolve the
/// execution target, spawn, and mirror the child's exit status.
fn dispatch(
    config: &Config,
    name: &str,
    matches: &clap::ArgMatches,
    in_container: bool,
) -> Result<ExitCode, CliError> {
    // A configured name that collides with a built-in never joins the clap
    // tree, so it must not resolve here either
    if cli::RESERVED.contains(&name) {
        return Err(ConfigError::CommandNotFound(name.to_string()).into());
    }
    // Lookup comes first: externally captured names carry no trailing args
    let spec = config.lookup(name)?;
    let args = cli::trailing(matches);
    let bound = template::bind(&spec.shell, &args, BindMode::Raw);
    let request = target::resolve(&bound, config.container.as_ref(), in_container)?;
    let outcome = runner::run(&spec.name, &request)?;
    Ok(exit_code_from(outcome.exit_code()))
}

fn exit_code_from(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
