//! Run aggregator - executes a selection of tasks and collects outcomes

use crate::catalog::Catalog;
use crate::context::{ConfirmCallback, ProgressCallback};
use crate::executor::TaskExecutor;
use crate::types::{Outcome, TaskOutcome};
use serde::Serialize;

/// Outcomes of one invocation, in execution order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    pub outcomes: Vec<TaskOutcome>,
    /// Set when the run stopped early on interrupt
    pub interrupted: bool,
}

impl RunResult {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Tasks that succeeded or were skipped
    pub fn ok_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_ok()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Succeeded)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Skipped { .. }))
            .count()
    }

    /// Failed tasks, each with its id and description
    pub fn failed(&self) -> Vec<&TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.outcome.is_ok()).collect()
    }

    pub fn is_success(&self) -> bool {
        !self.interrupted && self.failed().is_empty()
    }
}

/// Execute the given ids in order
///
/// Ids are expected to be validated against the catalog already; unknown
/// ids are logged and ignored. A failed task never stops the run, only an
/// interrupt does.
pub fn run_tasks(
    executor: &TaskExecutor<'_>,
    catalog: &Catalog,
    ids: &[String],
    progress: &mut dyn ProgressCallback,
    confirm: &mut dyn ConfirmCallback,
) -> RunResult {
    let mut result = RunResult::default();

    for id in ids {
        if executor.interrupt().is_set() {
            result.interrupted = true;
            break;
        }

        let Some(task) = catalog.get(id) else {
            log::warn!("unknown task id {id}, skipping");
            continue;
        };

        result.outcomes.push(executor.execute(task, progress, confirm));
    }

    if executor.interrupt().is_set() {
        result.interrupted = true;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::context::{AutoConfirm, Interrupt, NoProgress};
    use crate::error::TaskError;
    use crate::selection::{Selection, parse_selection};
    use crate::task::{Task, TaskKind};
    use crate::testing::MockRunner;
    use crate::types::{CommandOutput, Outcome, Step};
    use std::sync::atomic::AtomicBool;

    fn install(id: &str, pkg: &str) -> Task {
        Task::new(
            id,
            format!("Install {pkg}"),
            TaskKind::Packages {
                packages: vec![pkg.into()],
                steps: vec![Step::exec(["dnf", "install", "-y", pkg])],
            },
        )
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Category::new(
                "Apps",
                vec![install("1", "vlc"), install("2", "btop"), install("3", "timeshift")],
            ),
            Category::new("Tools", vec![install("4", "preload"), install("5", "tlp")]),
        ])
        .unwrap()
    }

    #[test]
    fn failures_do_not_stop_the_run() {
        let runner = MockRunner::new()
            .respond("rpm -q vlc", CommandOutput::ok("vlc"))
            .respond("dnf install -y btop", CommandOutput::failed(1, "No match for argument: btop"))
            .respond("dnf install -y timeshift", CommandOutput::ok(""))
            .respond("dnf install -y preload", CommandOutput::not_found("dnf"))
            .respond("dnf install -y tlp", CommandOutput::ok(""))
            .otherwise(CommandOutput::failed(1, "not installed"));
        let executor = TaskExecutor::new(&runner);
        let ids: Vec<String> = ["1", "2", "3", "4", "5"].map(String::from).to_vec();

        let result = run_tasks(&executor, &catalog(), &ids, &mut NoProgress, &mut AutoConfirm);

        assert_eq!(result.total(), 5);
        assert_eq!(result.ok_count(), 3);
        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.skipped(), 1);
        let failed: Vec<(&str, &str)> = result
            .failed()
            .iter()
            .map(|o| (o.id.as_str(), o.description.as_str()))
            .collect();
        assert_eq!(failed, [("2", "Install btop"), ("4", "Install preload")]);
        assert!(!result.is_success());
    }

    #[test]
    fn counts_add_up() {
        let runner = MockRunner::new().otherwise(CommandOutput::failed(1, "nope"));
        let executor = TaskExecutor::new(&runner);
        let ids = catalog().ids();

        let result = run_tasks(&executor, &catalog(), &ids, &mut NoProgress, &mut AutoConfirm);
        assert_eq!(result.total(), 5);
        assert_eq!(result.failed().len(), 5);
        assert_eq!(result.ok_count(), result.total() - result.failed().len());
    }

    #[test]
    fn runs_in_selection_order() {
        let runner = MockRunner::new().otherwise(CommandOutput::ok(""));
        let executor = TaskExecutor::new(&runner);
        let Selection::Tasks(ids) = parse_selection("5,3-4,1", &catalog()).unwrap() else {
            panic!("expected tasks");
        };

        let result = run_tasks(&executor, &catalog(), &ids, &mut NoProgress, &mut AutoConfirm);
        let order: Vec<&str> = result.outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order, ["1", "3", "4", "5"]);
        assert!(result.is_success());
    }

    #[test]
    fn invalid_selection_runs_nothing() {
        let runner = MockRunner::new();
        assert!(parse_selection("99", &catalog()).is_err());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn interrupt_stops_before_next_task() {
        let flag: &'static AtomicBool = Box::leak(Box::new(AtomicBool::new(true)));
        let runner = MockRunner::new().otherwise(CommandOutput::ok(""));
        let executor = TaskExecutor::new(&runner).with_interrupt(Interrupt::new(flag));

        let result = run_tasks(&executor, &catalog(), &catalog().ids(), &mut NoProgress, &mut AutoConfirm);
        assert!(result.interrupted);
        assert_eq!(result.total(), 0);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn interrupt_mid_task_keeps_partial_outcomes() {
        let flag: &'static AtomicBool = Box::leak(Box::new(AtomicBool::new(false)));
        let runner = MockRunner::new()
            .respond("dnf install -y vlc", CommandOutput::ok(""))
            .respond("dnf install -y btop", CommandOutput::failed(130, ""))
            .interrupt_on("dnf install -y btop", flag)
            .otherwise(CommandOutput::failed(1, "not installed"));
        let executor = TaskExecutor::new(&runner).with_interrupt(Interrupt::new(flag));

        let result = run_tasks(&executor, &catalog(), &catalog().ids(), &mut NoProgress, &mut AutoConfirm);

        assert!(result.interrupted);
        assert_eq!(result.total(), 2);
        assert_eq!(result.succeeded(), 1);
        assert_eq!(
            result.outcomes[1].outcome,
            Outcome::Failed {
                error: TaskError::Interrupted.to_string(),
            }
        );
        assert!(!runner.called("rpm -q timeshift"));
        assert!(!runner.called("dnf install -y timeshift"));
    }
}
