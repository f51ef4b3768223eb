use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fedora-setup")]
#[command(version)]
#[command(about = "Post-installation setup for Fedora Workstation", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/fedora-setup/config.toml)
    #[arg(long, global = true, env = "FEDORA_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pick tasks from an interactive menu
    Menu(MenuArgs),

    /// Run tasks without the menu
    Run(RunArgs),

    /// Show which tasks are already applied (read-only)
    Status(StatusArgs),

    /// List all available tasks
    List(ListArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Default)]
pub struct MenuArgs {
    /// Only check; never change anything
    #[arg(long)]
    pub dry_run: bool,

    /// Don't ask before the system upgrade
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Tasks to run: ids and ranges (e.g. "1,3,5-8") or "all"
    pub selection: String,

    /// Only check; never change anything
    #[arg(long)]
    pub dry_run: bool,

    /// Don't ask before the system upgrade
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct StatusArgs {
    /// Tasks to check (default: all)
    pub selection: Option<String>,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Print the task table as JSON
    #[arg(long)]
    pub json: bool,
}
