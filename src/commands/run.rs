use anyhow::{Result, bail};
use colored::Colorize;
use setupkit::{
    Catalog, RunResult, Selection, SystemRunner, TaskExecutor, parse_selection, run_tasks,
};

use crate::Context;
use crate::cli::RunArgs;
use crate::privilege;
use crate::progress::TerminalProgress;
use crate::prompt::TerminalConfirm;
use crate::signal::{self, EXIT_INTERRUPTED};
use crate::ui;

/// How a batch of tasks is executed
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub assume_yes: bool,
    pub quiet: bool,
}

impl RunOptions {
    /// Flags from the command line win over config settings
    pub fn resolve(ctx: &Context, dry_run: bool, yes: bool) -> Self {
        Self {
            dry_run: dry_run || ctx.config.settings.dry_run,
            assume_yes: yes || ctx.config.settings.assume_yes,
            quiet: ctx.quiet,
        }
    }
}

pub fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    privilege::require_root();

    let catalog = ctx.config.catalog()?;
    let ids = match parse_selection(&args.selection, &catalog)? {
        Selection::Quit => return Ok(()),
        Selection::Tasks(ids) => ids,
    };

    let opts = RunOptions::resolve(ctx, args.dry_run, args.yes);
    let result = execute_selection(&catalog, &ids, opts);
    print_summary(&result);
    exit_if_interrupted(&result);

    if !result.is_success() {
        bail!("{} task(s) failed", result.failed().len());
    }
    Ok(())
}

/// Run the selected ids against the live system
pub fn execute_selection(catalog: &Catalog, ids: &[String], opts: RunOptions) -> RunResult {
    println!();
    ui::rule();
    println!(
        "{}",
        format!("Starting setup for {} selected task(s)...", ids.len()).bold()
    );
    if opts.dry_run {
        ui::dim("dry run: nothing will be changed");
    }
    ui::rule();

    log::info!("running tasks: {}", ids.join(","));

    let runner = SystemRunner;
    let executor = TaskExecutor::new(&runner)
        .dry_run(opts.dry_run)
        .with_interrupt(signal::interrupt());
    let mut progress = TerminalProgress::new(opts.quiet);
    let mut confirm = TerminalConfirm::new(opts.assume_yes);

    let _busy = signal::Busy::enter();
    run_tasks(&executor, catalog, ids, &mut progress, &mut confirm)
}

/// Print totals and the failed list
pub fn print_summary(result: &RunResult) {
    println!();
    ui::rule();
    println!("{}", "Setup Run Complete".bold());
    ui::rule();

    println!(
        "{}",
        format!("✔ {} task(s) succeeded or were skipped.", result.ok_count()).green()
    );

    let failed = result.failed();
    if !failed.is_empty() {
        println!("{}", format!("✘ {} task(s) failed:", failed.len()).red());
        for outcome in failed {
            println!(
                "{}",
                format!("  - Task {} ({})", outcome.id, outcome.description).red()
            );
        }
    }
}

/// Ctrl-C during a run ends the process after the summary
pub fn exit_if_interrupted(result: &RunResult) {
    if result.interrupted {
        ui::interrupted();
        std::process::exit(EXIT_INTERRUPTED);
    }
}
