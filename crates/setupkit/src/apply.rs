//! Mutation applier - brings the system into the task's desired state

use crate::check::config_line_present;
use crate::context::Interrupt;
use crate::error::TaskError;
use crate::runner::CommandRunner;
use crate::task::TaskKind;
use crate::types::Step;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Apply a task's change
pub fn apply(
    kind: &TaskKind,
    runner: &dyn CommandRunner,
    interrupt: Interrupt,
) -> Result<(), TaskError> {
    match kind {
        TaskKind::ConfigLines { path, lines } => append_missing_lines(path, lines),
        other => run_steps(other.steps(), runner, interrupt),
    }
}

/// Run steps in order, stopping at the first failure
pub fn run_steps(
    steps: &[Step],
    runner: &dyn CommandRunner,
    interrupt: Interrupt,
) -> Result<(), TaskError> {
    for step in steps {
        if interrupt.is_set() {
            return Err(TaskError::Interrupted);
        }

        let output = runner.run(step);

        if output.not_found {
            return Err(TaskError::ExecutableNotFound {
                program: step.program().to_string(),
            });
        }
        if !output.success {
            if interrupt.is_set() {
                return Err(TaskError::Interrupted);
            }
            return Err(TaskError::CommandFailed {
                command: step.display(),
                detail: output.last_error_line(),
            });
        }
    }

    Ok(())
}

/// Append each line that is not already in the file
///
/// Lines are re-checked one by one since an earlier line of the same task
/// may already be present. The first write error aborts the rest.
pub fn append_missing_lines(path: &Path, lines: &[String]) -> Result<(), TaskError> {
    for line in lines {
        if config_line_present(path, line) {
            continue;
        }
        append_line(path, line).map_err(|source| TaskError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("appended '{line}' to {}", path.display());
    }
    Ok(())
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "\n{line}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRunner;
    use crate::types::CommandOutput;

    #[test]
    fn steps_stop_at_first_failure() {
        let runner = MockRunner::new()
            .respond("dnf install -y tlp tlp-rdw", CommandOutput::ok(""))
            .respond(
                "systemctl mask power-profiles-daemon",
                CommandOutput::failed(1, "Failed to mask unit\nUnit is locked\n"),
            );
        let steps = vec![
            Step::exec(["dnf", "install", "-y", "tlp", "tlp-rdw"]),
            Step::exec(["systemctl", "mask", "power-profiles-daemon"]),
            Step::exec(["systemctl", "enable", "--now", "tlp"]),
        ];

        let err = run_steps(&steps, &runner, Interrupt::never()).unwrap_err();
        assert!(matches!(err, TaskError::CommandFailed { ref detail, .. } if detail == "Unit is locked"));
        assert!(!runner.called("systemctl enable --now tlp"));
    }

    #[test]
    fn missing_executable_names_program() {
        let runner = MockRunner::new().respond("flatpak remote-add flathub", CommandOutput::not_found("flatpak"));
        let steps = vec![Step::exec(["flatpak", "remote-add", "flathub"])];
        let err = run_steps(&steps, &runner, Interrupt::never()).unwrap_err();
        assert!(err.to_string().contains("flatpak"));
    }

    #[test]
    fn interrupted_before_first_step() {
        let flag: &'static std::sync::atomic::AtomicBool =
            Box::leak(Box::new(std::sync::atomic::AtomicBool::new(true)));
        let runner = MockRunner::new().otherwise(CommandOutput::ok(""));
        let steps = vec![Step::exec(["dnf", "install", "-y", "vlc"])];
        let err = run_steps(&steps, &runner, Interrupt::new(flag)).unwrap_err();
        assert!(matches!(err, TaskError::Interrupted));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn child_killed_by_ctrl_c_is_interrupted() {
        let flag: &'static std::sync::atomic::AtomicBool =
            Box::leak(Box::new(std::sync::atomic::AtomicBool::new(false)));
        let runner = MockRunner::new()
            .respond("dnf install -y vlc", CommandOutput::failed(130, ""))
            .interrupt_on("dnf install -y vlc", flag)
            .otherwise(CommandOutput::ok(""));
        let steps = vec![
            Step::exec(["dnf", "install", "-y", "vlc"]),
            Step::exec(["systemctl", "enable", "--now", "tlp"]),
        ];

        let err = run_steps(&steps, &runner, Interrupt::new(flag)).unwrap_err();
        assert!(matches!(err, TaskError::Interrupted));
        assert_eq!(runner.calls(), ["dnf install -y vlc"]);
    }

    #[test]
    fn appends_only_missing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dnf.conf");
        std::fs::write(&path, "[main]\nfastestmirror=True\n").unwrap();

        let lines = vec!["max_parallel_downloads=10".to_string(), "fastestmirror=True".to_string()];
        append_missing_lines(&path, &lines).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[main]\nfastestmirror=True\n\nmax_parallel_downloads=10\n");
    }

    #[test]
    fn duplicate_lines_in_one_task_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.conf");

        let lines = vec!["deltarpm=True".to_string(), " deltarpm=True ".to_string()];
        append_missing_lines(&path, &lines).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("deltarpm=True").count(), 1);
    }

    #[test]
    fn write_failure_is_reported() {
        let lines = vec!["x=1".to_string()];
        let err = append_missing_lines(Path::new("/nonexistent/setupkit/x.conf"), &lines).unwrap_err();
        assert!(matches!(err, TaskError::ConfigWrite { .. }));
        assert!(err.to_string().contains("/nonexistent/setupkit/x.conf"));
    }
}
