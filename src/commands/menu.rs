use anyhow::Result;
use colored::Colorize;
use console::Term;
use setupkit::{Catalog, Selection, SelectionError, parse_selection};
use std::process;
use std::thread;
use std::time::Duration;

use crate::Context;
use crate::cli::MenuArgs;
use crate::commands::run::{self, RunOptions};
use crate::privilege;
use crate::prompt;
use crate::signal::{self, EXIT_INTERRUPTED};
use crate::ui;

/// How long an invalid selection stays on screen
const ERROR_PAUSE: Duration = Duration::from_secs(2);

pub fn run(ctx: &Context, args: MenuArgs) -> Result<()> {
    privilege::require_root();

    let catalog = ctx.config.catalog()?;
    let opts = RunOptions::resolve(ctx, args.dry_run, args.yes);
    let term = Term::stdout();

    loop {
        if let Err(e) = term.clear_screen() {
            log::debug!("could not clear screen: {e}");
        }
        display_menu(&catalog, opts.dry_run);

        let input = exit_if_interrupted(prompt::read_selection())?;
        let ids = match parse_selection(&input, &catalog) {
            Ok(Selection::Quit) => break,
            Ok(Selection::Tasks(ids)) => ids,
            Err(SelectionError::Empty) => continue,
            Err(e) => {
                ui::error(&format!("Error: {e}"));
                thread::sleep(ERROR_PAUSE);
                continue;
            }
        };

        let result = run::execute_selection(&catalog, &ids, opts);
        run::print_summary(&result);
        run::exit_if_interrupted(&result);

        exit_if_interrupted(prompt::wait_for_enter())?;
    }

    println!("Exiting setup tool. Goodbye!");
    Ok(())
}

/// A prompt that failed because of Ctrl-C ends the process with 130
fn exit_if_interrupted<T>(result: Result<T>) -> Result<T> {
    if result.is_err() && signal::interrupt().is_set() {
        ui::interrupted();
        process::exit(EXIT_INTERRUPTED);
    }
    result
}

fn display_menu(catalog: &Catalog, dry_run: bool) {
    ui::banner();
    println!("Select tasks to perform (e.g., 1,3,7 or 5-8).");
    if dry_run {
        ui::dim("dry run: tasks are checked but never applied");
    }

    for category in catalog.categories() {
        ui::section(&category.name);
        for task in &category.tasks {
            println!(
                "  {} {}",
                format!("[{:>2}]", task.id).green(),
                task.description
            );
        }
    }

    println!();
    ui::rule();
    println!("  {} Run all tasks", "[all]".green());
    println!("  {} Quit", "[q]".red());
    ui::rule();
}
