use anyhow::Result;
use colored::Colorize;

use crate::Context;
use crate::cli::ListArgs;
use crate::ui;

pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let catalog = ctx.config.catalog()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.categories())?);
        return Ok(());
    }

    for category in catalog.categories() {
        ui::section(&category.name);
        for task in &category.tasks {
            println!(
                "  {} {:<50} {}",
                format!("[{:>2}]", task.id).green(),
                task.description,
                task.kind.label().dimmed()
            );
        }
    }

    println!();
    ui::dim(&format!("{} tasks", catalog.len()));
    Ok(())
}
