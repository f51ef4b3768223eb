//! Process runner - executes task commands and captures their output

use crate::types::{CommandOutput, Step};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Executes a single command
///
/// Implementations never fail: a program that cannot be spawned is reported
/// as an unsuccessful [`CommandOutput`] so the caller can turn it into a
/// task failure.
pub trait CommandRunner: Send + Sync {
    /// Run a step to completion, blocking until it exits
    fn run(&self, step: &Step) -> CommandOutput;

    /// Convenience wrapper for literal commands
    fn run_args(&self, argv: &[&str]) -> CommandOutput {
        self.run(&Step::exec(argv.iter().copied()))
    }
}

/// Runs commands on the local system
///
/// There is no timeout: a hung subprocess blocks the caller indefinitely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, step: &Step) -> CommandOutput {
        if step.argv.is_empty() {
            return CommandOutput::failed(-1, "empty command");
        }

        let mut cmd = if step.shell {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(step.display());
            cmd
        } else {
            let mut cmd = Command::new(step.program());
            cmd.args(&step.argv[1..]);
            cmd
        };

        log::debug!("running{}: {}", if step.shell { " (sh)" } else { "" }, step);

        let result = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match result {
            Ok(output) => {
                let output = CommandOutput::from(output);
                log::trace!("{} exited with {:?}", step.program(), output.code);
                output
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let program = if step.shell { "sh" } else { step.program() };
                log::debug!("{program} not found on PATH");
                CommandOutput::not_found(program)
            }
            Err(e) => CommandOutput {
                success: false,
                code: None,
                stdout: String::new(),
                stderr: format!("failed to execute {}: {e}", step.program()),
                not_found: false,
            },
        }
    }
}

/// Whether `program` resolves on `PATH`, asked through the runner
pub fn command_exists(runner: &dyn CommandRunner, program: &str) -> bool {
    runner
        .run_args(&["sh", "-c", "command -v \"$1\"", "sh", program])
        .success
}
