//! Operator prompts

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use setupkit::{ConfirmCallback, PendingUpdate};
use std::io;

use crate::signal;
use crate::ui;

/// How many pending updates to show before eliding
const MAX_LISTED_UPDATES: usize = 20;

/// Asks on the terminal before the system upgrade
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmCallback for TerminalConfirm {
    fn confirm_upgrade(&mut self, description: &str, updates: &[PendingUpdate]) -> Result<bool> {
        show_updates(updates);

        if self.assume_yes {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(format!("Proceed with '{description}'?"))
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

/// Print the advisory list of pending updates
fn show_updates(updates: &[PendingUpdate]) {
    if updates.is_empty() {
        ui::info("No pending updates were listed by dnf.");
        return;
    }

    ui::section(&format!("{} package(s) can be upgraded", updates.len()));
    for update in updates.iter().take(MAX_LISTED_UPDATES) {
        println!(
            "  {:<40} {} {}",
            format!("{}.{}", update.name, update.arch),
            update.version.green(),
            format!("({})", update.repo).dimmed()
        );
    }
    if updates.len() > MAX_LISTED_UPDATES {
        ui::dim(&format!("... and {} more", updates.len() - MAX_LISTED_UPDATES));
    }
    println!();
}

/// Read the menu selection
pub fn read_selection() -> Result<String> {
    Input::<String>::new()
        .with_prompt("❯".green().to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
        .context("Failed to read selection")
}

/// Block until the operator presses Enter
pub fn wait_for_enter() -> Result<()> {
    println!();
    println!("{}", "Press Enter to return to the main menu...".cyan());
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(())
}

/// Ctrl-C read as a key in raw mode never reaches the signal handler
fn prompt_error(err: dialoguer::Error) -> anyhow::Error {
    if is_interrupt(&err) {
        signal::raise();
    }
    err.into()
}

fn is_interrupt(err: &dialoguer::Error) -> bool {
    let dialoguer::Error::IO(io_err) = err;
    io_err.kind() == io::ErrorKind::Interrupted
}
