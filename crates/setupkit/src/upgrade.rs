//! Pending update listing for the system upgrade task
//!
//! `dnf check-update` prints one `name.arch  version  repo` row per package
//! and exits 100 when updates are available. The column layout is not a
//! stable interface, so the result is for display only.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static UPDATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\S+)\.(?P<arch>[A-Za-z0-9_]+)\s+(?P<version>\S+)\s+(?P<repo>\S+)\s*$")
        .expect("valid regex")
});

/// dnf's exit code for "updates are available"
pub const UPDATES_AVAILABLE: i32 = 100;

/// One package with an available update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingUpdate {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub repo: String,
}

/// Parse `dnf check-update` output, ignoring anything that does not fit
pub fn parse_updates(stdout: &str) -> Vec<PendingUpdate> {
    let mut updates = Vec::new();

    for line in stdout.lines() {
        // Obsoleting section lists replacements, not updates
        if line.trim_start().starts_with("Obsoleting") {
            break;
        }
        if let Some(caps) = UPDATE_LINE.captures(line.trim_end()) {
            updates.push(PendingUpdate {
                name: caps["name"].to_string(),
                arch: caps["arch"].to_string(),
                version: caps["version"].to_string(),
                repo: caps["repo"].to_string(),
            });
        }
    }

    updates
}
