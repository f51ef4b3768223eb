//! Task executor - check, then apply if needed, then classify
//!
//! ```text
//! Pending -> Checking -> Skipped
//!                     -> Applying -> Succeeded | Failed
//! ```
//!
//! Errors never escape: anything that goes wrong while applying becomes
//! [`Outcome::Failed`].

use crate::apply::apply;
use crate::check::{Check, check};
use crate::context::{ConfirmCallback, Interrupt, ProgressCallback};
use crate::error::TaskError;
use crate::runner::CommandRunner;
use crate::task::{Task, TaskKind};
use crate::types::{Outcome, SkipReason, Step, TaskOutcome};
use crate::upgrade::{UPDATES_AVAILABLE, parse_updates};

/// Runs single tasks against a command runner
pub struct TaskExecutor<'a> {
    runner: &'a dyn CommandRunner,
    dry_run: bool,
    interrupt: Interrupt,
}

impl<'a> TaskExecutor<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            dry_run: false,
            interrupt: Interrupt::never(),
        }
    }

    /// Only check; report pending tasks as skipped
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn interrupt(&self) -> Interrupt {
        self.interrupt
    }

    /// Run the idempotency check only
    pub fn check(&self, task: &Task) -> Check {
        check(&task.kind, self.runner)
    }

    /// Drive one task to a terminal state
    pub fn execute(
        &self,
        task: &Task,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> TaskOutcome {
        progress.on_task_start(&task.id, &task.description);

        let outcome = self.resolve(task, progress, confirm);

        let outcome = TaskOutcome {
            id: task.id.clone(),
            description: task.description.clone(),
            outcome,
        };
        progress.on_task_complete(&outcome);
        outcome
    }

    fn resolve(
        &self,
        task: &Task,
        progress: &mut dyn ProgressCallback,
        confirm: &mut dyn ConfirmCallback,
    ) -> Outcome {
        if self.check(task) == Check::Satisfied {
            log::info!("task {} already applied", task.id);
            return Outcome::Skipped {
                reason: SkipReason::AlreadyApplied,
            };
        }
        log::debug!("task {} pending ({})", task.id, task.kind.label());

        if self.dry_run {
            return Outcome::Skipped {
                reason: SkipReason::DryRun,
            };
        }

        if let TaskKind::SystemUpgrade { query, .. } = &task.kind {
            match self.confirm_upgrade(task, query, confirm) {
                Ok(true) => {}
                Ok(false) => {
                    log::info!("task {} declined by operator", task.id);
                    return Outcome::Skipped {
                        reason: SkipReason::Declined,
                    };
                }
                Err(e) => return Outcome::Failed {
                    error: e.to_string(),
                },
            }
        }

        progress.on_apply_start(&task.id, &task.description);
        let result = apply(&task.kind, self.runner, self.interrupt);
        progress.on_apply_end(&task.id);

        match result {
            Ok(()) => {
                log::info!("task {} applied", task.id);
                Outcome::Succeeded
            }
            Err(e) => {
                match e.command() {
                    Some(command) => {
                        log::info!("task {} failed running `{command}`: {e}", task.id);
                    }
                    None => log::info!("task {} failed: {e}", task.id),
                }
                Outcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// List pending updates and ask the operator
    fn confirm_upgrade(
        &self,
        task: &Task,
        query: &Step,
        confirm: &mut dyn ConfirmCallback,
    ) -> Result<bool, TaskError> {
        let output = self.runner.run(query);
        if self.interrupt.is_set() {
            return Err(TaskError::Interrupted);
        }
        if !output.success && output.code != Some(UPDATES_AVAILABLE) {
            log::warn!("update query failed: {}", output.last_error_line());
        }

        let updates = parse_updates(&output.stdout);
        confirm
            .confirm_upgrade(&task.description, &updates)
            .map_err(|e| TaskError::Confirm(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoConfirm, AutoDecline, NoProgress};
    use crate::testing::MockRunner;
    use crate::types::CommandOutput;
    use crate::upgrade::PendingUpdate;

    fn upgrade_task() -> Task {
        Task::new(
            "1",
            "Run Full System Update (dnf upgrade)",
            TaskKind::SystemUpgrade {
                query: Step::exec(["dnf", "check-update", "--refresh"]),
                steps: vec![Step::exec(["dnf", "upgrade", "--refresh", "-y"])],
            },
        )
    }

    fn vlc_task() -> Task {
        Task::new(
            "7",
            "Install VLC Media Player",
            TaskKind::Packages {
                packages: vec!["vlc".into()],
                steps: vec![Step::exec(["dnf", "install", "-y", "vlc"])],
            },
        )
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_task_start(&mut self, id: &str, _description: &str) {
            self.events.push(format!("start {id}"));
        }
        fn on_apply_start(&mut self, id: &str, _description: &str) {
            self.events.push(format!("apply {id}"));
        }
        fn on_apply_end(&mut self, id: &str) {
            self.events.push(format!("end {id}"));
        }
        fn on_task_complete(&mut self, outcome: &TaskOutcome) {
            self.events.push(format!("done {}", outcome.id));
        }
    }

    struct Capture(Vec<PendingUpdate>);

    impl ConfirmCallback for Capture {
        fn confirm_upgrade(&mut self, _d: &str, updates: &[PendingUpdate]) -> anyhow::Result<bool> {
            self.0 = updates.to_vec();
            Ok(false)
        }
    }

    #[test]
    fn installed_packages_are_skipped_without_applying() {
        let runner = MockRunner::new().respond("rpm -q vlc", CommandOutput::ok("vlc-3.0.21"));
        let mut progress = Recorder::default();
        let out = TaskExecutor::new(&runner).execute(&vlc_task(), &mut progress, &mut AutoConfirm);

        assert!(matches!(out.outcome, Outcome::Skipped { .. }));
        assert_eq!(runner.calls(), ["rpm -q vlc"]);
        assert_eq!(progress.events, ["start 7", "done 7"]);
    }

    #[test]
    fn missing_package_is_installed() {
        let runner = MockRunner::new()
            .respond("rpm -q vlc", CommandOutput::failed(1, "package vlc is not installed"))
            .respond("dnf install -y vlc", CommandOutput::ok("Complete!"));
        let mut progress = Recorder::default();
        let out = TaskExecutor::new(&runner).execute(&vlc_task(), &mut progress, &mut AutoConfirm);

        assert_eq!(out.outcome, Outcome::Succeeded);
        assert_eq!(progress.events, ["start 7", "apply 7", "end 7", "done 7"]);
    }

    #[test]
    fn empty_package_list_is_never_skipped() {
        let task = Task::new(
            "30",
            "Swap ffmpeg",
            TaskKind::Packages {
                packages: vec![],
                steps: vec![Step::exec(["dnf", "swap", "ffmpeg-free", "ffmpeg", "-y"])],
            },
        );
        let runner = MockRunner::new().otherwise(CommandOutput::ok(""));
        let out = TaskExecutor::new(&runner).execute(&task, &mut NoProgress, &mut AutoConfirm);
        assert_eq!(out.outcome, Outcome::Succeeded);
        assert!(runner.called("dnf swap ffmpeg-free ffmpeg -y"));
    }

    #[test]
    fn not_found_stops_sequence_and_names_program() {
        let task = Task::new(
            "4",
            "Enable Flathub Repository",
            TaskKind::Unconditional {
                steps: vec![
                    Step::exec(["flatpak", "remote-add", "flathub"]),
                    Step::exec(["flatpak", "update", "-y"]),
                ],
            },
        );
        let runner = MockRunner::new()
            .respond("flatpak remote-add flathub", CommandOutput::not_found("flatpak"));
        let out = TaskExecutor::new(&runner).execute(&task, &mut NoProgress, &mut AutoConfirm);

        match out.outcome {
            Outcome::Failed { error } => assert!(error.contains("flatpak")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(runner.calls(), ["flatpak remote-add flathub"]);
    }

    #[test]
    fn declined_upgrade_is_skipped_without_upgrading() {
        let runner = MockRunner::new().respond(
            "dnf check-update --refresh",
            CommandOutput::failed(UPDATES_AVAILABLE, ""),
        );
        let out = TaskExecutor::new(&runner).execute(&upgrade_task(), &mut NoProgress, &mut AutoDecline);

        assert_eq!(
            out.outcome,
            Outcome::Skipped {
                reason: SkipReason::Declined
            }
        );
        assert!(!runner.called("dnf upgrade --refresh -y"));
    }

    #[test]
    fn confirmed_upgrade_runs_and_lists_updates() {
        let mut query = CommandOutput::failed(UPDATES_AVAILABLE, "");
        query.stdout = "kernel.x86_64  6.17.4-300.fc43  updates\n".into();
        let runner = MockRunner::new()
            .respond("dnf check-update --refresh", query.clone())
            .respond("dnf upgrade --refresh -y", CommandOutput::ok("Complete!"));

        let out = TaskExecutor::new(&runner).execute(&upgrade_task(), &mut NoProgress, &mut AutoConfirm);
        assert_eq!(out.outcome, Outcome::Succeeded);

        let runner = MockRunner::new().respond("dnf check-update --refresh", query);
        let mut capture = Capture(vec![]);
        TaskExecutor::new(&runner).execute(&upgrade_task(), &mut NoProgress, &mut capture);
        assert_eq!(capture.0.len(), 1);
        assert_eq!(capture.0[0].name, "kernel");
    }

    #[test]
    fn dry_run_applies_nothing() {
        let runner = MockRunner::new().respond("rpm -q vlc", CommandOutput::failed(1, ""));
        let out = TaskExecutor::new(&runner)
            .dry_run(true)
            .execute(&vlc_task(), &mut NoProgress, &mut AutoConfirm);
        assert_eq!(
            out.outcome,
            Outcome::Skipped {
                reason: SkipReason::DryRun
            }
        );
        assert_eq!(runner.calls(), ["rpm -q vlc"]);
    }

    #[test]
    fn config_task_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dnf.conf");
        std::fs::write(&path, "[main]\ngpgcheck=True\n").unwrap();
        let task = Task::new(
            "3",
            "Apply Common DNF Tweaks",
            TaskKind::ConfigLines {
                path: path.clone(),
                lines: vec![
                    "max_parallel_downloads=10".into(),
                    "fastestmirror=True".into(),
                    "deltarpm=True".into(),
                ],
            },
        );
        let runner = MockRunner::new();
        let executor = TaskExecutor::new(&runner);

        let first = executor.execute(&task, &mut NoProgress, &mut AutoConfirm);
        assert_eq!(first.outcome, Outcome::Succeeded);
        let after_first = std::fs::read_to_string(&path).unwrap();

        let second = executor.execute(&task, &mut NoProgress, &mut AutoConfirm);
        assert!(matches!(second.outcome, Outcome::Skipped { .. }));
        let after_second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(after_first, after_second);
        for line in ["max_parallel_downloads=10", "fastestmirror=True", "deltarpm=True"] {
            assert_eq!(after_second.lines().filter(|l| *l == line).count(), 1);
        }
        assert!(runner.calls().is_empty());
    }
}
