//! Spawning and supervision of the resolved child process

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use log::{debug, warn};
use thiserror::Error;

use crate::relay::SignalRelay;
use crate::style::Paint;
use crate::target::ExecutionRequest;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Unable to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Unable to wait for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
    #[error("Refusing to run an empty command line")]
    EmptyCommandLine,
}

/// How a child process finished.
///
/// A non-zero code or a terminating signal is carried here rather than as an
/// error: the child failing is not a failure of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
    pub signal: Option<i32>,
    pub duration: Duration,
}

impl ExitOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code the dispatcher should propagate: the child's own code, or
    /// `128 + signal` when the child was terminated by a signal.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if let Some(code) = self.code {
            code
        } else if let Some(signal) = self.signal {
            128 + signal
        } else {
            1
        }
    }
}

/// Spawn the resolved command line and wait for it, relaying interrupt
/// signals to the child and reporting timing on stderr. The child inherits
/// the dispatcher's standard streams untouched.
///
/// # Errors
///
/// Returns `RunError::EmptyCommandLine` for a request without a program,
/// `RunError::Spawn` if the program cannot be launched, or `RunError::Wait`
/// if the child cannot be awaited.
pub fn run(name: &str, request: &ExecutionRequest) -> Result<ExitOutcome, RunError> {
    let Some((program, args)) = request.command_line.split_first() else {
        return Err(RunError::EmptyCommandLine);
    };
    debug!("Spawning {:?}", request.command_line);

    let paint = Paint::new();
    eprintln!("{}", paint.note(&format!("Running [{name}]")));

    let start = Instant::now();
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| RunError::Spawn {
            program: program.clone(),
            source: e,
        })?;

    // Armed only once a child handle exists; a signal racing the spawn
    // follows default process behavior
    let relay = match SignalRelay::arm(child.id()) {
        Ok(relay) => Some(relay),
        Err(e) => {
            warn!("Unable to arm the signal relay: {e}");
            None
        }
    };

    let waited = child.wait();
    if let Some(relay) = relay {
        relay.stop();
    }
    let duration = start.elapsed();

    let status = waited.map_err(|e| RunError::Wait {
        program: program.clone(),
        source: e,
    })?;

    let outcome = ExitOutcome {
        code: status.code(),
        signal: terminating_signal(&status),
        duration,
    };

    let elapsed = format_duration(duration);
    let line = if outcome.success() {
        format!("Completed [{name}] after {elapsed}")
    } else if let Some(signal) = outcome.signal {
        format!("Completed [{name}] after {elapsed} (signal {signal})")
    } else {
        format!(
            "Completed [{name}] after {elapsed} (exit code {})",
            outcome.exit_code()
        )
    };
    eprintln!("{}", paint.note(&line));

    Ok(outcome)
}

#[cfg(unix)]
fn terminating_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let millis = d.subsec_millis();
    if total_secs < 60 {
        let tenths = millis / 100;
        format!("{total_secs}.{tenths}s")
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        let tenths = millis / 100;
        format!("{mins}m {secs}.{tenths}s")
    }
}
