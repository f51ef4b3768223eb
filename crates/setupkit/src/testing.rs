//! Test doubles shared by the engine's unit tests

use crate::runner::CommandRunner;
use crate::types::{CommandOutput, Step};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runner that answers from a table and records every command line
#[derive(Default)]
pub struct MockRunner {
    responses: HashMap<String, CommandOutput>,
    fallback: Option<CommandOutput>,
    /// Commands during which Ctrl-C "arrives"
    trips: HashMap<String, &'static AtomicBool>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` (argv joined by spaces) with `output`
    pub fn respond(mut self, command: &str, output: CommandOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    /// Answer every unlisted command with `output`
    pub fn otherwise(mut self, output: CommandOutput) -> Self {
        self.fallback = Some(output);
        self
    }

    /// Raise `flag` while `command` runs, as SIGINT would
    pub fn interrupt_on(mut self, command: &str, flag: &'static AtomicBool) -> Self {
        self.trips.insert(command.to_string(), flag);
        self
    }

    /// Command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, step: &Step) -> CommandOutput {
        let line = step.display();
        self.calls.lock().unwrap().push(line.clone());
        if let Some(flag) = self.trips.get(&line) {
            flag.store(true, Ordering::SeqCst);
        }
        self.responses
            .get(&line)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| CommandOutput::failed(1, format!("unexpected command: {line}")))
    }
}
