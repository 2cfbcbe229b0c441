//! Trailing-argument substitution for command templates

/// Marker in a command template that receives the trailing CLI arguments.
pub const ARGS_PLACEHOLDER: &str = "$@";

/// How trailing arguments are inserted into a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindMode {
    /// Insert the arguments verbatim, joined by single spaces. This matches
    /// the historic dispatcher byte-for-byte; the caller is responsible for
    /// any quoting.
    #[default]
    Raw,
    /// Single-quote each argument before joining, so values containing
    /// whitespace or shell metacharacters survive the interpreter intact.
    Quoted,
}

/// Replace the first occurrence of [`ARGS_PLACEHOLDER`] in `template` with
/// the joined arguments.
///
/// A template without the placeholder is returned unchanged and the
/// arguments are dropped.
#[must_use]
pub fn bind(template: &str, args: &[String], mode: BindMode) -> String {
    let joined = match mode {
        BindMode::Raw => args.join(" "),
        BindMode::Quoted => args
            .iter()
            .map(|arg| quote(arg))
            .collect::<Vec<_>>()
            .join(" "),
    };
    template.replacen(ARGS_PLACEHOLDER, &joined, 1)
}

fn quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}
