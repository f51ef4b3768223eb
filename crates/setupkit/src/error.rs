//! Error types for the setupkit crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while applying a task
///
/// These never escape the executor; they become a failed outcome.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Program is not on the execution path
    #[error("command not found: {program}")]
    ExecutableNotFound { program: String },

    /// Program ran and returned a non-zero status
    #[error("{detail}")]
    CommandFailed { command: String, detail: String },

    /// Appending to a config file failed
    #[error("could not write to {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The confirmation prompt itself failed
    #[error("confirmation failed: {0}")]
    Confirm(String),

    /// Operator interrupted the run
    #[error("interrupted")]
    Interrupted,
}

impl TaskError {
    /// The command line that failed, if a command was run
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Invalid task selection input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing was entered
    #[error("no tasks selected")]
    Empty,

    /// One or more tokens do not name a task
    #[error("invalid task IDs: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// Task table violates an invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same id is used twice
    #[error("duplicate task id '{id}' ('{first}' and '{second}')")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    /// Ids must be numbers for range selection
    #[error("task id '{0}' is not a plain number")]
    NonNumericId(String),

    /// A task without an id
    #[error("task '{0}' has an empty id")]
    EmptyId(String),
}
