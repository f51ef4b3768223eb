use colored::Colorize;
use setupkit::{Outcome, SkipReason, TaskOutcome};

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.blue().bold());
}

/// Print a thick separator line
pub fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

const RULE_WIDTH: usize = 41;

/// One line describing how a task ended
pub fn outcome_line(outcome: &TaskOutcome) -> String {
    match &outcome.outcome {
        Outcome::Skipped {
            reason: SkipReason::AlreadyApplied,
        } => format!(
            " {}",
            format!("✔ Skipping: {} (Already applied)", outcome.description).yellow()
        ),
        Outcome::Skipped { reason } => format!(
            " {}",
            format!("⊘ Skipped: {} ({reason})", outcome.description).yellow()
        ),
        Outcome::Succeeded => format!(
            " {}",
            format!("✔ SUCCESS: {}", outcome.description).green()
        ),
        Outcome::Failed { error } => format!(
            " {}\n   {}",
            format!("✘ FAILED: {}", outcome.description).red(),
            format!("Error: {error}").red()
        ),
    }
}

/// Tell the operator that the run was cut short
pub fn interrupted() {
    eprintln!();
    eprintln!("{}", "Interrupted by user. Exiting.".yellow());
}

/// Print the fedora-setup banner
pub fn banner() {
    let title = " Fedora Post-Installation Setup Tool";
    println!("{}", "=".repeat(RULE_WIDTH).magenta().bold());
    println!("{}", title.magenta().bold());
    println!("{}", "=".repeat(RULE_WIDTH).magenta().bold());
}

// ============================================================================
// Tests
// ============================================================================
