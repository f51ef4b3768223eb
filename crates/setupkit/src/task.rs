//! Task definitions
//!
//! A task is one independently checkable and applicable setup action. The
//! kind decides both how completion is detected and how the change is made,
//! and carries exactly the fields that behavior needs.

use crate::types::Step;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single setup task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable numeric identifier, unique across all categories
    pub id: String,
    /// Human-readable description shown in menus and summaries
    pub description: String,
    #[serde(flatten)]
    pub kind: TaskKind,
}

/// What a task manages, with the parameters for checking and applying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// Done when every package is installed in the RPM database
    Packages {
        packages: Vec<String>,
        steps: Vec<Step>,
    },
    /// Done when the application id is in the installed Flatpak list
    Flatpak { app_id: String, steps: Vec<Step> },
    /// Done when `dnf group info` reports the group as installed
    Group { group: String, steps: Vec<Step> },
    /// Done when every line is present in the file; applied by appending
    ConfigLines { path: PathBuf, lines: Vec<String> },
    /// Done when the path exists
    FileExists { path: PathBuf, steps: Vec<Step> },
    /// Done when `probe` succeeds and its stdout contains `needle`
    CommandOutput {
        probe: Step,
        needle: String,
        steps: Vec<Step>,
    },
    /// Always runs
    Unconditional { steps: Vec<Step> },
    /// Full system upgrade: lists pending updates and asks for confirmation
    SystemUpgrade { query: Step, steps: Vec<Step> },
}

impl TaskKind {
    /// Commands executed by the applier (empty for config lines)
    pub fn steps(&self) -> &[Step] {
        match self {
            Self::Packages { steps, .. }
            | Self::Flatpak { steps, .. }
            | Self::Group { steps, .. }
            | Self::FileExists { steps, .. }
            | Self::CommandOutput { steps, .. }
            | Self::Unconditional { steps }
            | Self::SystemUpgrade { steps, .. } => steps,
            Self::ConfigLines { .. } => &[],
        }
    }

    /// Short label for listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Packages { .. } => "packages",
            Self::Flatpak { .. } => "flatpak",
            Self::Group { .. } => "group",
            Self::ConfigLines { .. } => "config",
            Self::FileExists { .. } => "file",
            Self::CommandOutput { .. } => "probe",
            Self::Unconditional { .. } => "always",
            Self::SystemUpgrade { .. } => "upgrade",
        }
    }
}

impl Task {
    pub fn new(id: impl Into<String>, description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
        }
    }

    /// Numeric value of the id, used for ordering and ranges
    pub fn number(&self) -> Option<u32> {
        self.id.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lines_have_no_steps() {
        let kind = TaskKind::ConfigLines {
            path: PathBuf::from("/etc/dnf/dnf.conf"),
            lines: vec!["fastestmirror=True".into()],
        };
        assert!(kind.steps().is_empty());
        assert_eq!(kind.label(), "config");
    }

    #[test]
    fn steps_are_exposed_in_order() {
        let kind = TaskKind::Packages {
            packages: vec!["preload".into()],
            steps: vec![
                Step::exec(["dnf", "install", "-y", "preload"]),
                Step::exec(["systemctl", "enable", "--now", "preload"]),
            ],
        };
        let programs: Vec<_> = kind.steps().iter().map(Step::program).collect();
        assert_eq!(programs, ["dnf", "systemctl"]);
    }

    #[test]
    fn number_parses_id() {
        let task = Task::new("12", "btop", TaskKind::Unconditional { steps: vec![] });
        assert_eq!(task.number(), Some(12));
        let task = Task::new("x", "bad", TaskKind::Unconditional { steps: vec![] });
        assert_eq!(task.number(), None);
    }
}
