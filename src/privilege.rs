//! Root privilege precondition
//!
//! Package installs, repo files and `/etc` edits all need root. The check is
//! done once, before any task runs; read-only commands skip it.

use colored::Colorize;

use crate::ui;

/// Whether the effective user is root
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}

/// Exit with status 1 unless running as root
pub fn require_root() {
    if is_root() {
        return;
    }

    ui::error(&format!("{} This tool must be run as root.", "Error:".bold()));
    eprintln!("Please run it with: {}", "sudo fedora-setup".green());
    std::process::exit(1);
}
