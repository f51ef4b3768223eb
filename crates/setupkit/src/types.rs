//! Core types shared by the checker, applier and executor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Output;

/// One command of a task
///
/// `shell` is decided when the task is defined. Literal steps are passed to
/// the program verbatim; shell steps are joined and handed to `sh -c` so that
/// `$(...)` substitution and `>` redirection work.
///
/// The argv of a shell step is a pre-quoted command line: elements are
/// joined with single spaces and nothing is escaped, so an element that must
/// stay one word carries its own shell quoting (e.g. `"'a b'"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub argv: Vec<String>,
    #[serde(default)]
    pub shell: bool,
}

impl Step {
    /// A literal argument vector, no shell interpretation
    pub fn exec<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            shell: false,
        }
    }

    /// A command line that must go through the shell
    ///
    /// Elements are joined verbatim; quote them as the shell expects.
    pub fn shell<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            shell: true,
        }
    }

    /// The executable name (first argument)
    pub fn program(&self) -> &str {
        self.argv.first().map_or("", String::as_str)
    }

    /// The full command line as a single string
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit code, `None` when killed by a signal or never started
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Set when the program could not be located
    pub not_found: bool,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            not_found: false,
        }
    }
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    /// The program was not found on `PATH`
    pub fn not_found(program: &str) -> Self {
        Self {
            success: false,
            code: None,
            stdout: String::new(),
            stderr: format!("command not found: {program}"),
            not_found: true,
        }
    }

    /// Last non-empty line of stderr, used as the failure excerpt
    pub fn last_error_line(&self) -> String {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| match self.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            })
    }
}

/// Why a task was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyApplied,
    Declined,
    DryRun,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AlreadyApplied => "already applied",
            Self::Declined => "declined",
            Self::DryRun => "dry run",
        })
    }
}

/// Terminal state of one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Effect already present, or not attempted
    Skipped { reason: SkipReason },
    /// Mutation applied
    Succeeded,
    /// Mutation attempted and failed
    Failed { error: String },
}

impl Outcome {
    /// Succeeded or skipped
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Outcome of a task together with its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub id: String,
    pub description: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}
