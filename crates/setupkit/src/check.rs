//! Idempotency checks - is a task's effect already present?
//!
//! Every check fails open: if the state cannot be determined the task is
//! treated as not applied, never as silently done.

use crate::runner::CommandRunner;
use crate::task::TaskKind;
use std::fs;
use std::path::Path;

/// Result of checking a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Effect already present
    Satisfied,
    /// Needs to be applied
    Pending,
}

impl From<bool> for Check {
    fn from(done: bool) -> Self {
        if done { Self::Satisfied } else { Self::Pending }
    }
}

/// Determine whether the task's effect is already present
pub fn check(kind: &TaskKind, runner: &dyn CommandRunner) -> Check {
    let done = match kind {
        TaskKind::Packages { packages, .. } => {
            // No packages means no completion signal
            !packages.is_empty() && packages.iter().all(|p| package_installed(runner, p))
        }
        TaskKind::Flatpak { app_id, .. } => flatpak_installed(runner, app_id),
        TaskKind::Group { group, .. } => group_installed(runner, group),
        TaskKind::ConfigLines { path, lines } => {
            path.exists() && lines.iter().all(|l| config_line_present(path, l))
        }
        TaskKind::FileExists { path, .. } => path.exists(),
        TaskKind::CommandOutput { probe, needle, .. } => {
            let output = runner.run(probe);
            output.success && output.stdout.contains(needle.as_str())
        }
        TaskKind::Unconditional { .. } | TaskKind::SystemUpgrade { .. } => false,
    };

    Check::from(done)
}

/// Programs the check for `kind` shells out to
///
/// Without them the check can only ever report [`Check::Pending`].
pub fn required_tools(kind: &TaskKind) -> &'static [&'static str] {
    match kind {
        TaskKind::Packages { .. } => &["rpm"],
        TaskKind::Flatpak { .. } => &["flatpak"],
        TaskKind::Group { .. } => &["dnf"],
        _ => &[],
    }
}

/// Check if an RPM package is installed
pub fn package_installed(runner: &dyn CommandRunner, package: &str) -> bool {
    runner.run_args(&["rpm", "-q", package]).success
}

/// Check if a Flatpak application is installed
pub fn flatpak_installed(runner: &dyn CommandRunner, app_id: &str) -> bool {
    let output = runner.run_args(&["flatpak", "list", "--app", "--columns=application"]);
    output.success && output.stdout.lines().any(|l| l.trim() == app_id)
}

/// Check if a DNF group is installed
pub fn group_installed(runner: &dyn CommandRunner, group: &str) -> bool {
    let output = runner.run_args(&["dnf", "group", "info", group]);
    output.success && output.stdout.contains("Installed")
}

/// Check if a config file contains the line, ignoring surrounding whitespace
///
/// Unreadable files count as "not applied".
pub fn config_line_present(path: &Path, line: &str) -> bool {
    if !path.exists() {
        return false;
    }

    match fs::read_to_string(path) {
        Ok(content) => {
            let wanted = line.trim();
            content.lines().any(|l| l.trim() == wanted)
        }
        Err(e) => {
            log::warn!("Error reading config {}: {e}", path.display());
            false
        }
    }
}
