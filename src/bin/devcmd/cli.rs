use clap::{Arg, ArgMatches, Command};
use log::warn;

use devcmd::config_file::Config;

/// Subcommand names owned by the dispatcher itself; configured commands
/// cannot shadow them.
pub const RESERVED: [&str; 3] = ["dev", "init", "help"];

/// Build the CLI from the loaded config: one subcommand per configured
/// command, the same set again under `dev` for in-container runs, and the
/// `init` scaffolding commands. Unknown names are captured as external
/// subcommands so they can be reported as proper errors.
pub fn build(config: &Config) -> Command {
    let mut root = Command::new("devcmd")
        .about("Project command dispatcher for devcontainers")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .allow_external_subcommands(true);

    let mut dev = Command::new("dev")
        .about("Run a configured command inside the devcontainer")
        .allow_external_subcommands(true);

    for (key, spec) in &config.commands {
        if RESERVED.contains(&key.as_str()) {
            warn!("Config command '{key}' collides with a built-in subcommand and is ignored");
            continue;
        }
        root = root.subcommand(command_stub(key, &spec.shell));
        dev = dev.subcommand(command_stub(key, &spec.shell));
    }

    root.subcommand(dev).subcommand(
        Command::new("init")
            .about("Write a starter .devcontainer/cmd.yaml")
            .subcommand(Command::new("go").about("Write Go devcontainer starter files")),
    )
}

fn command_stub(name: &str, shell: &str) -> Command {
    Command::new(name.to_string()).about(shell.to_string()).arg(
        Arg::new("args")
            .help("Trailing arguments bound to the template's $@ placeholder")
            .num_args(0..)
            .trailing_var_arg(true)
            .allow_hyphen_values(true),
    )
}

/// Trailing arguments of a matched configured command. Only valid for
/// subcommands built by [`build`]; externally captured names carry no
/// `args` id.
pub fn trailing(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
