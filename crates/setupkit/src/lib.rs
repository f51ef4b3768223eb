//! # setupkit
//!
//! An engine for idempotent post-install setup tasks.
//!
//! Each [`Task`] knows how to tell whether its effect is already present on
//! the machine and how to bring it about. The engine checks first, applies
//! only what is missing, and reports one [`TaskOutcome`] per task.
//!
//! ## Core Concepts
//!
//! - **Task / TaskKind**: what to manage (packages, a Flatpak app, a DNF
//!   group, config lines, a file, a probe command, a system upgrade)
//! - **Catalog**: the validated, read-only table of tasks
//! - **CommandRunner**: executes commands; swapped for a mock in tests
//! - **TaskExecutor**: check → skip, or apply → succeeded/failed
//! - **RunResult**: outcomes of a selection, with derived counts
//!
//! ## Example
//!
//! ```no_run
//! use setupkit::{
//!     AutoConfirm, Catalog, Category, NoProgress, Selection, Step, SystemRunner, Task,
//!     TaskExecutor, TaskKind, parse_selection, run_tasks,
//! };
//!
//! let catalog = Catalog::new(vec![Category::new(
//!     "Utilities",
//!     vec![Task::new(
//!         "1",
//!         "Install btop",
//!         TaskKind::Packages {
//!             packages: vec!["btop".into()],
//!             steps: vec![Step::exec(["dnf", "install", "-y", "btop"])],
//!         },
//!     )],
//! )])?;
//!
//! if let Selection::Tasks(ids) = parse_selection("1", &catalog)? {
//!     let executor = TaskExecutor::new(&SystemRunner);
//!     let result = run_tasks(&executor, &catalog, &ids, &mut NoProgress, &mut AutoConfirm);
//!     println!("{} ok, {} failed", result.ok_count(), result.failed().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Provider Traits
//!
//! - [`CommandRunner`]: runs commands
//! - [`ProgressCallback`]: receives phase changes (drive a spinner from it)
//! - [`ConfirmCallback`]: asks the operator before a system upgrade

pub mod apply;
pub mod catalog;
pub mod check;
pub mod context;
pub mod error;
pub mod executor;
pub mod run;
pub mod runner;
pub mod selection;
pub mod task;
pub mod types;
pub mod upgrade;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use catalog::{Catalog, Category};
pub use check::{Check, required_tools};
pub use context::{
    AutoConfirm, AutoDecline, ConfirmCallback, Interrupt, NoProgress, ProgressCallback,
};
pub use error::{CatalogError, SelectionError, TaskError};
pub use executor::TaskExecutor;
pub use run::{RunResult, run_tasks};
pub use runner::{CommandRunner, SystemRunner, command_exists};
pub use selection::{Selection, parse_selection};
pub use task::{Task, TaskKind};
pub use types::{CommandOutput, Outcome, SkipReason, Step, TaskOutcome};
pub use upgrade::{PendingUpdate, parse_updates};
