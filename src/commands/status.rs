use anyhow::Result;
use colored::Colorize;
use setupkit::{
    Catalog, Check, CommandRunner, Selection, SystemRunner, Task, TaskExecutor, TaskKind,
    command_exists, parse_selection, required_tools,
};
use std::collections::BTreeSet;

use crate::Context;
use crate::cli::StatusArgs;
use crate::progress;
use crate::ui;

/// Check tasks without applying anything
pub fn run(ctx: &Context, args: StatusArgs) -> Result<()> {
    let catalog = ctx.config.catalog()?;
    let ids = match args.selection.as_deref() {
        None => catalog.ids(),
        Some(input) => match parse_selection(input, &catalog)? {
            Selection::Quit => return Ok(()),
            Selection::Tasks(ids) => ids,
        },
    };

    for tool in missing_tools(&SystemRunner, &catalog, &ids) {
        ui::warn(&format!("{tool} not found; tasks checked with it will show as pending"));
    }

    let checks = check_all(&catalog, &ids, ctx.quiet);

    ui::header("Task Status");
    for (task, check) in &checks {
        println!("{}", status_line(task, *check));
    }

    let applied = checks
        .iter()
        .filter(|(_, c)| *c == Check::Satisfied)
        .count();
    println!();
    println!(
        "{} applied, {} pending",
        applied.to_string().green(),
        (checks.len() - applied).to_string().yellow()
    );
    Ok(())
}

/// Check programs the selected tasks need but the system lacks
fn missing_tools(
    runner: &dyn CommandRunner,
    catalog: &Catalog,
    ids: &[String],
) -> Vec<&'static str> {
    let needed: BTreeSet<&'static str> = ids
        .iter()
        .filter_map(|id| catalog.get(id))
        .flat_map(|task| required_tools(&task.kind).iter().copied())
        .collect();
    needed
        .into_iter()
        .filter(|tool| !command_exists(runner, tool))
        .collect()
}

fn check_all<'a>(catalog: &'a Catalog, ids: &[String], quiet: bool) -> Vec<(&'a Task, Check)> {
    let runner = SystemRunner;
    let executor = TaskExecutor::new(&runner);

    let pb = (!quiet).then(|| progress::spinner("Checking tasks..."));
    let checks = ids
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|task| {
            if let Some(pb) = &pb {
                pb.set_message(format!("Checking: {}", task.description));
            }
            (task, executor.check(task))
        })
        .collect();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    checks
}

fn status_line(task: &Task, check: Check) -> String {
    let id = format!("[{:>2}]", task.id);
    match (check, &task.kind) {
        (Check::Satisfied, _) => {
            format!("  {} {} {}", "✓".green(), id.dimmed(), task.description)
        }
        (Check::Pending, TaskKind::Unconditional { .. } | TaskKind::SystemUpgrade { .. }) => {
            format!(
                "  {} {} {} {}",
                "↻".cyan(),
                id.dimmed(),
                task.description,
                "(runs every time)".dimmed()
            )
        }
        (Check::Pending, _) => format!(
            "  {} {} {} {}",
            "○".yellow(),
            id.dimmed(),
            task.description,
            "(pending)".dimmed()
        ),
    }
}
