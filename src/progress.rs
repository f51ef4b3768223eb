//! Terminal progress for task runs
//!
//! A spinner ticks on indicatif's background thread while a task is being
//! applied. It is owned by [`TerminalProgress`] for exactly that phase and
//! cleared before the outcome line is printed.

use indicatif::{ProgressBar, ProgressStyle};
use setupkit::{ProgressCallback, TaskOutcome};
use std::time::Duration;

use crate::ui;

const TICK_CHARS: &str = "⣾⣽⣻⢿⡿⣟⣯⣷ ";
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Create a spinner with a message
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template(" {msg:.cyan} {spinner:.cyan}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(TICK_INTERVAL);
    pb
}

/// Prints outcomes and animates the applying phase
#[derive(Default)]
pub struct TerminalProgress {
    spinner: Option<ProgressBar>,
    quiet: bool,
}

impl TerminalProgress {
    pub fn new(quiet: bool) -> Self {
        Self {
            spinner: None,
            quiet,
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_task_start(&mut self, _id: &str, _description: &str) {
        if !self.quiet {
            println!();
        }
    }

    fn on_apply_start(&mut self, _id: &str, description: &str) {
        self.stop_spinner();
        if !self.quiet {
            self.spinner = Some(spinner(&format!("Running: {description}")));
        }
    }

    fn on_apply_end(&mut self, _id: &str) {
        self.stop_spinner();
    }

    fn on_task_complete(&mut self, outcome: &TaskOutcome) {
        self.stop_spinner();
        if !self.quiet || !outcome.outcome.is_ok() {
            println!("{}", ui::outcome_line(outcome));
        }
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
